//! The bundled finance course.

use learn_core::model::{Catalog, CatalogError, Lesson, LessonContent, Module, Question};

/// Builds and validates the six-module finance curriculum.
///
/// # Errors
///
/// Returns `CatalogError` if the bundled data violates a catalog invariant.
pub fn finance_curriculum() -> Result<Catalog, CatalogError> {
    Catalog::new(vec![
        economic_engine(),
        investment_vehicles(),
        market_mechanics(),
        portfolio_strategy(),
        psychology(),
        advanced_metrics(),
    ])
}

fn lesson(id: &str, title: &str, duration: &str, markdown: &str) -> Lesson {
    Lesson::new(id, title, duration, LessonContent::markdown(markdown.trim()))
}

fn question(
    id: &str,
    prompt: &str,
    options: &[&str],
    correct_index: usize,
    explanation: &str,
) -> Question {
    Question::new(
        id,
        prompt,
        options.iter().map(|option| (*option).to_owned()).collect(),
        correct_index,
        explanation,
    )
}

// ─── Module 1 ──────────────────────────────────────────────────────────────

fn economic_engine() -> Module {
    Module::new(
        "m1",
        "Module 1: The Economic Engine",
        "Understand the invisible forces of inflation, interest, and risk.",
        vec![
            lesson(
                "l1-1",
                "Inflation & Purchasing Power",
                "15 min",
                r#"
### The Silent Thief

Inflation is not just "prices going up." It is the rate at which the purchasing
power of a currency falls. If you bury $10,000 in your backyard today, in 20
years it will still be $10,000, but it might only buy what $5,000 buys today.

#### The Real Return Formula

To know if you are actually building wealth, look at *real* returns, not
*nominal* returns.

```text
Real Return ≈ Nominal Return - Inflation Rate
```

> **Example:** if your savings account pays **5%** interest but inflation is
> **3%**, your *real* wealth is only growing by **2%**.
"#,
            ),
            lesson(
                "l1-2",
                "The Time Value of Money",
                "20 min",
                r#"
### Compound Interest

Compound interest is earning "interest on your interest." It creates an
exponential growth curve. The most critical variable in compounding is not the
amount of money, but **time (t)**.

#### The Formula

```text
A = P (1 + r/n)^(n·t)
```

- `P` = principal (starting amount)
- `r` = annual interest rate (decimal)
- `n` = times compounded per year
- **`t` = time in years**
"#,
            ),
            lesson(
                "l1-3",
                "Risk vs. Reward",
                "15 min",
                r#"
### The Iron Law of Finance

There is no "safe high return." To achieve higher returns you must accept
higher volatility (risk). The baseline is the *risk-free rate*, usually
defined by US Treasury bonds.

| Risk | Examples | Expected return |
|------|----------|-----------------|
| Low | Cash, CDs, government bonds | 3-5% |
| Medium | S&P 500, real estate, corporate bonds | 7-10% |
| High | Startups, crypto, options | -100% to +1000% |
"#,
            ),
        ],
        vec![
            question(
                "q1-1",
                "If inflation is 4% and your investment returns 6%, what is your approximate Real Return?",
                &["10%", "2%", "6%", "-2%"],
                1,
                "Real Return ≈ Nominal Return (6%) - Inflation (4%) = 2%.",
            ),
            question(
                "q1-2",
                "Which variable has the most powerful effect in the compound interest formula over the long term?",
                &["Principal (P)", "Frequency (n)", "Time (t)", "None of the above"],
                2,
                "Time is an exponent in the formula, meaning it drives exponential growth more than linear additions to principal.",
            ),
            question(
                "q1-3",
                "What is typically considered the 'Risk-Free Rate' benchmark?",
                &["The S&P 500 average", "US Treasury Bonds", "Gold prices", "Apple Stock"],
                1,
                "US Treasury Bonds are backed by the full faith and credit of the US government, making them the standard for 'risk-free' returns.",
            ),
            question(
                "q1-4",
                "What happens to purchasing power during high inflation?",
                &["It increases", "It stays the same", "It decreases", "It fluctuates wildly"],
                2,
                "As prices rise (inflation), each unit of currency buys fewer goods and services.",
            ),
            question(
                "q1-5",
                "To get higher potential returns, you generally must accept:",
                &["Lower taxes", "Higher volatility/risk", "Lower liquidity", "Higher fees"],
                1,
                "The risk/reward tradeoff is fundamental. Higher expected returns act as compensation for enduring higher volatility.",
            ),
        ],
    )
}

// ─── Module 2 ──────────────────────────────────────────────────────────────

fn investment_vehicles() -> Module {
    Module::new(
        "m2",
        "Module 2: Investment Vehicles",
        "Deep dive into Stocks, Bonds, ETFs, and how to value them.",
        vec![
            lesson(
                "l2-1",
                "Equities (Stocks)",
                "20 min",
                r#"
### Equity = Ownership

When you buy a stock you are not just buying a ticker symbol. You are buying a
legal claim to a fraction of a company's future cash flows.

#### Market Capitalization

This tells you how much the market thinks the whole company is worth.

```text
Market Cap = Share Price × Shares Outstanding
```
"#,
            ),
            lesson(
                "l2-2",
                "Valuation Metrics",
                "25 min",
                r#"
### Price vs. Value

A $1000 stock can be "cheap" and a $5 stock can be "expensive." Valuation
depends on earnings.

#### The P/E Ratio

```text
P/E = Share Price / Earnings Per Share
```

- **High P/E:** investors expect high growth (e.g. tech).
- **Low P/E:** mature company or undervalued (e.g. utilities).
"#,
            ),
            lesson(
                "l2-3",
                "Fixed Income (Bonds)",
                "15 min",
                r#"
### The Seesaw Effect

Bonds pay a fixed *coupon*. When interest rates in the market rise, existing
bonds with lower coupons become less valuable.

**The rule: rates UP means prices DOWN.**

```text
Yield = Coupon Payment / Current Price
```
"#,
            ),
            lesson(
                "l2-4",
                "Funds (ETFs vs Mutual Funds)",
                "15 min",
                r#"
### Diversification

Funds let you buy the haystack instead of looking for the needle.

#### ETF

- Trades all day (real-time pricing)
- Usually passive (index tracking)
- Tax efficient
- Low expense ratios

#### Mutual Fund

- Trades once (at market close)
- Often active (manager picking stocks)
- Capital gains distributions
- Often higher fees
"#,
            ),
        ],
        vec![
            question(
                "q2-1",
                "What does ownership of a 'Share' represent?",
                &[
                    "A loan to the company",
                    "Fractional ownership of the company",
                    "A guaranteed dividend",
                    "Right to manage the company daily",
                ],
                1,
                "Equity is ownership. You own a piece of the company's assets and earnings.",
            ),
            question(
                "q2-2",
                "If interest rates RISE, what generally happens to the price of existing bonds?",
                &["Prices Rise", "Prices Fall", "Prices stay the same", "Coupons double"],
                1,
                "Because new bonds offer higher yields, existing bonds with lower coupons become less attractive, forcing their price down to match the new yield.",
            ),
            question(
                "q2-3",
                "Which ratio helps determine if a stock is 'expensive' relative to its earnings?",
                &["Price-to-Earnings (P/E)", "Debt-to-Equity", "Return on Assets", "Sharpe Ratio"],
                0,
                "The P/E ratio compares the stock price to the actual profits (earnings) the company generates.",
            ),
            question(
                "q2-4",
                "Which vehicle typically trades intra-day like a stock?",
                &["Mutual Fund", "ETF (Exchange Traded Fund)", "Certificate of Deposit", "Savings Bond"],
                1,
                "ETFs trade on exchanges throughout the day, whereas Mutual Funds only price once at the end of the trading day.",
            ),
            question(
                "q2-5",
                "Market Capitalization is calculated by:",
                &[
                    "Assets minus Liabilities",
                    "Share Price × Total Shares Outstanding",
                    "Revenue × 10",
                    "Net Income + Cash",
                ],
                1,
                "Market Cap is the total aggregate value of all shares combined.",
            ),
        ],
    )
}

// ─── Module 3 ──────────────────────────────────────────────────────────────

fn market_mechanics() -> Module {
    Module::new(
        "m3",
        "Module 3: Market Mechanics",
        "How the market actually functions: Order books, Technicals, and Cycles.",
        vec![
            lesson(
                "l3-1",
                "The Order Book",
                "20 min",
                r#"
### The Auction

There is no store setting prices. Prices are discovered through a continuous
double auction.

- **The Bid:** highest price a buyer pays.
- **The Ask:** lowest price a seller accepts.

```text
Spread = Ask - Bid
```

Low liquidity means a high spread, which makes trading costly.
"#,
            ),
            lesson(
                "l3-2",
                "Intro to Technical Analysis",
                "25 min",
                r#"
### Reading Price Action

Technical analysis (TA) ignores the company's business and focuses purely on
price history and volume.

- **Bullish candle (green):** close price > open price.
- **Bearish candle (red):** close price < open price.
"#,
            ),
            lesson(
                "l3-3",
                "Market Cycles",
                "15 min",
                r#"
### Bulls & Bears

Markets move in psychological cycles of expansion and contraction.

- **Bull market:** usually a 20% rise from lows. Driven by optimism.
- **Bear market:** usually a 20% drop from highs. Driven by fear or recession.
"#,
            ),
        ],
        vec![
            question(
                "q3-1",
                "What is the 'Spread' in an order book?",
                &[
                    "The broker's commission",
                    "The difference between the Bid and Ask price",
                    "The daily range of a stock",
                    "The dividend yield",
                ],
                1,
                "The spread represents the gap between what buyers are willing to pay and sellers are willing to accept. It is a cost of trading.",
            ),
            question(
                "q3-2",
                "In a Candlestick chart, what does a GREEN candle usually indicate?",
                &[
                    "The stock closed lower than it opened",
                    "The stock closed higher than it opened",
                    "High volatility",
                    "Low volume",
                ],
                1,
                "A green (or white) candle indicates bullish price action where the close price was higher than the opening price.",
            ),
            question(
                "q3-3",
                "A 'Bear Market' is typically defined as a drop of what percentage from recent highs?",
                &["5%", "10%", "20%", "50%"],
                2,
                "While 10% is a 'correction', a 20% drop is the technical definition of a Bear Market.",
            ),
            question(
                "q3-4",
                "Which price represents what a Seller is willing to accept?",
                &["The Bid", "The Ask", "The Strike", "The Spot"],
                1,
                "The Ask is the lowest price a seller is currently offering in the order book.",
            ),
            question(
                "q3-5",
                "Technical Analysis focuses primarily on:",
                &[
                    "Company earnings reports",
                    "Management team quality",
                    "Price action and Volume history",
                    "Industry supply chains",
                ],
                2,
                "TA is the study of market action (price/volume) rather than the fundamental business data.",
            ),
        ],
    )
}

// ─── Module 4 ──────────────────────────────────────────────────────────────

fn portfolio_strategy() -> Module {
    Module::new(
        "m4",
        "Module 4: Portfolio Strategy",
        "Building your fortress: Allocation, DCA, and Rebalancing.",
        vec![
            lesson(
                "l4-1",
                "Asset Allocation",
                "20 min",
                r#"
### The Secret Sauce

90% of your portfolio's variance is explained by asset allocation (how much in
stocks vs bonds), not by which specific stocks you pick.

#### The Classic 60/40

**60% stocks / 40% bonds.** Stocks provide growth (the engine), bonds provide
stability (the shock absorbers).
"#,
            ),
            lesson(
                "l4-2",
                "Dollar Cost Averaging (DCA)",
                "10 min",
                r#"
### Beat the Timing

Timing the bottom is mathematically impossible for most. DCA removes emotion by
investing a fixed amount on a fixed schedule.

When the market is down, your fixed $500 buys **more shares**. When the market
is up, it buys **fewer shares**. This naturally lowers your average cost per
share.

```text
Avg Cost = Total $ Invested / Total Shares
```
"#,
            ),
            lesson(
                "l4-3",
                "Rebalancing",
                "15 min",
                r#"
### Maintenance

If stocks double, your 60/40 portfolio might become 80/20, and you are taking
more risk than you intended. Rebalancing forces you to **sell high** (the
winners) and **buy low** (the laggards).

- Rebalance annually or when bands drift by 5%.
- Prevents style drift.
- Enforces discipline.
"#,
            ),
        ],
        vec![
            question(
                "q4-1",
                "Asset Allocation determines approximately what % of portfolio variance?",
                &["10%", "50%", "90%", "100%"],
                2,
                "Studies famously show that about 90% of return variability is due to allocation (stocks vs bonds), not individual security selection.",
            ),
            question(
                "q4-2",
                "The primary benefit of Dollar Cost Averaging (DCA) is:",
                &[
                    "Guaranteed highest returns",
                    "Eliminating emotional timing decisions",
                    "Avoiding all taxes",
                    "Getting dividends faster",
                ],
                1,
                "DCA automates investing, removing the fear/greed cycle of trying to time the market perfectly.",
            ),
            question(
                "q4-3",
                "Rebalancing involves:",
                &[
                    "Selling winners to buy losers",
                    "Selling losers to buy winners",
                    "Selling everything to cash",
                    "Buying only new IPOs",
                ],
                0,
                "Rebalancing restores your target risk profile. To do this, you must trim assets that have grown (Sell High) and add to assets that have shrunk (Buy Low).",
            ),
            question(
                "q4-4",
                "A '60/40' portfolio typically refers to:",
                &[
                    "60% Cash, 40% Gold",
                    "60% Stocks, 40% Bonds",
                    "60% Domestic, 40% International",
                    "60% Bitcoin, 40% Ether",
                ],
                1,
                "The 60/40 is the classic benchmark portfolio balancing growth (stocks) and stability (bonds).",
            ),
            question(
                "q4-5",
                "If your stock allocation grows too large relative to bonds, your portfolio has become:",
                &["Less risky", "More risky", "Risk neutral", "Tax exempt"],
                1,
                "Stocks are riskier than bonds. If they take over a larger % of the portfolio, the aggregate risk of the portfolio increases.",
            ),
        ],
    )
}

// ─── Module 5 ──────────────────────────────────────────────────────────────

fn psychology() -> Module {
    Module::new(
        "m5",
        "Module 5: Psychology",
        "Master your mind. Investing is 20% numbers and 80% behavior.",
        vec![
            lesson(
                "l5-1",
                "Bias & Emotion",
                "15 min",
                r#"
### The Lizard Brain

We evolved to survive on the savannah, not to trade stocks.

- **Confirmation bias:** ignoring negative news about a stock you own while
  obsessing over positive news.
- **Loss aversion:** the pain of losing $100 is psychologically 2x stronger
  than the joy of gaining $100.
"#,
            ),
            lesson(
                "l5-2",
                "FOMO & Discipline",
                "15 min",
                r#"
### Fear Of Missing Out

FOMO usually strikes at market tops. When your neighbor is getting rich on a
speculative asset, that is usually the worst time to buy.

> *"The stock market is a device for transferring money from the impatient to
> the patient."*
>
> Warren Buffett
"#,
            ),
        ],
        vec![
            question(
                "q5-1",
                "Loss Aversion suggests that:",
                &[
                    "We prefer losing money to gaining it",
                    "The pain of loss is stronger than the joy of gain",
                    "We should avoid all losses at any cost",
                    "Losses don't matter",
                ],
                1,
                "Psychological studies show the emotional impact of a loss is roughly twice that of an equivalent gain.",
            ),
            question(
                "q5-2",
                "Confirmation Bias leads investors to:",
                &[
                    "Seek out opposing viewpoints",
                    "Diversify their portfolio",
                    "Only look for info that supports their current beliefs",
                    "Sell everything",
                ],
                2,
                "It is the tendency to interpret new evidence as confirmation of one's existing theories.",
            ),
            question(
                "q5-3",
                "FOMO (Fear Of Missing Out) often causes investors to:",
                &["Buy at the top", "Buy at the bottom", "Sell too early", "Research thoroughly"],
                0,
                "FOMO drives investors to chase performance, usually resulting in buying assets that are already over-hyped and expensive.",
            ),
            question(
                "q5-4",
                "The quote 'The market transfers money from the impatient to the patient' is attributed to:",
                &["Elon Musk", "Warren Buffett", "Adam Smith", "Jerome Powell"],
                1,
                "Warren Buffett is famous for emphasizing patience and long-term holding periods.",
            ),
            question(
                "q5-5",
                "What is the best antidote to emotional trading?",
                &[
                    "Checking prices every hour",
                    "Having a written plan/strategy",
                    "Listening to TV pundits",
                    "Using high leverage",
                ],
                1,
                "A pre-defined plan (like DCA and allocation rules) removes the need to make emotional decisions in the heat of the moment.",
            ),
        ],
    )
}

// ─── Module 6 ──────────────────────────────────────────────────────────────

fn advanced_metrics() -> Module {
    Module::new(
        "m6",
        "Module 6: Advanced Metrics",
        "Quantifying risk. Beta, Sharpe Ratio, and Standard Deviation.",
        vec![
            lesson(
                "l6-1",
                "Beta & Volatility",
                "15 min",
                r#"
### Measuring Movement

Beta measures a stock's volatility relative to the overall market (S&P 500).

| Beta | Meaning |
|------|---------|
| = 1.0 | Moves exactly with the market. |
| > 1.0 | More volatile (aggressive). |
| < 1.0 | Less volatile (defensive). |
"#,
            ),
            lesson(
                "l6-2",
                "The Sharpe Ratio",
                "20 min",
                r#"
### Risk-Adjusted Return

Did you make money because you're smart, or because you took reckless risks?
The Sharpe ratio tells you.

```text
Sharpe = (Rp - Rf) / σp
```

- `Rp` = portfolio return
- `Rf` = risk-free rate
- `σp` = standard deviation (volatility)

**Score:** above 1 is good, above 2 is very good, above 3 is excellent.
"#,
            ),
        ],
        vec![
            question(
                "q6-1",
                "A Beta of 1.5 indicates the stock is:",
                &[
                    "50% less volatile than the market",
                    "50% more volatile than the market",
                    "Equal to the market",
                    "Risk free",
                ],
                1,
                "Beta > 1 implies higher volatility. If the market goes up 10%, a 1.5 Beta stock might go up 15% (and fall 15% on the downside).",
            ),
            question(
                "q6-2",
                "The Sharpe Ratio measures:",
                &["Total Return", "Maximum Drawdown", "Risk-Adjusted Return", "Dividends only"],
                2,
                "It calculates how much 'excess return' you are receiving for the extra volatility you are enduring.",
            ),
            question(
                "q6-3",
                "In the Sharpe formula, what is subtracted from the Portfolio Return?",
                &["Inflation", "The Risk-Free Rate", "The S&P 500 Return", "Fees"],
                1,
                "You subtract the Risk-Free Rate because that is the return you could have gotten for doing absolutely nothing.",
            ),
            question(
                "q6-4",
                "A stock with a Beta of 0.5 is considered:",
                &["High Growth", "Defensive", "Speculative", "Bankrupt"],
                1,
                "Low beta stocks (like Utilities) move less than the market, offering defense during crashes.",
            ),
            question(
                "q6-5",
                "Standard Deviation is a statistical measure of:",
                &["Profit", "Volatility/Dispersion", "Debt", "Liquidity"],
                1,
                "In finance, Standard Deviation is the primary metric for volatility: how far returns swing from the average.",
            ),
        ],
    )
}
