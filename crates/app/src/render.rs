use finboard_chart::ChartSlot;
use finboard_chart::terminal::render_text;
use finboard_core::market::entity::NewsItem;
use finboard_core::store::port::Session;
use finboard_views::dashboard::DashboardView;
use finboard_views::portfolio::PortfolioView;
use finboard_views::stocks::StocksView;
use finboard_views::trade::TradeView;

// 终端输出格式化，全部返回字符串以便测试。

fn line(out: &mut String, text: String) {
    out.push_str(&text);
    out.push('\n');
}

fn chart_block(out: &mut String, title: &str, slot: &ChartSlot) {
    if let Some(config) = slot.config() {
        line(out, format!("-- {title} --"));
        line(out, render_text(config));
    }
}

pub fn news(items: &[NewsItem]) -> String {
    let mut out = String::new();
    if items.is_empty() {
        out.push_str("No news.\n");
    }
    for item in items {
        let tickers = match item.ticker_list().as_slice() {
            [] => String::new(),
            list => format!(" ({})", list.join(", ")),
        };
        line(
            &mut out,
            format!(
                "[{}] {}{}",
                item.posted_on.format("%Y-%m-%d %H:%M"),
                item.title,
                tickers
            ),
        );
    }
    out
}

pub fn dashboard(view: &DashboardView) -> String {
    let mut out = String::new();
    chart_block(&mut out, "Top stocks", view.top_chart());

    if !view.top_stocks.is_empty() {
        line(&mut out, "-- Latest prices --".to_string());
        for (ticker, price) in &view.top_stocks {
            line(&mut out, format!("{ticker:<8} {price:>12.2}"));
        }
    }

    chart_block(&mut out, &format!("{} revenue", view.focus_ticker), view.revenue_chart());
    chart_block(&mut out, &format!("{} earnings", view.focus_ticker), view.earnings_chart());

    line(&mut out, "-- Market news --".to_string());
    out.push_str(&news(&view.news));

    for message in view.section_errors.values() {
        line(&mut out, format!("! {message}"));
    }
    out
}

pub fn stocks(view: &StocksView) -> String {
    let mut out = String::new();
    if let Some(error) = &view.error {
        line(&mut out, format!("! {error}"));
        return out;
    }
    line(
        &mut out,
        format!(
            "{}  price {:.2}  change {}  avg volume {:.0}",
            view.ticker,
            view.current_price,
            change(view.change_percent),
            view.average_volume
        ),
    );
    chart_block(&mut out, "Price", view.chart());
    out
}

/// 涨跌幅无定义时显示 `n/a`。
fn change(percent: Option<f64>) -> String {
    match percent {
        Some(pct) => format!("{pct:+.2}%"),
        None => "n/a".to_string(),
    }
}

pub fn portfolio(view: &PortfolioView) -> String {
    let mut out = String::new();
    if let Some(error) = &view.error {
        line(&mut out, format!("! {error}"));
        return out;
    }
    line(
        &mut out,
        format!("{:<8} {:>8} {:>12} {:>12}", "Ticker", "Shares", "Purchase", "Current"),
    );
    for p in &view.positions {
        line(
            &mut out,
            format!(
                "{:<8} {:>8} {:>12.2} {:>12.2}",
                p.ticker, p.shares, p.purchase_price, p.current_price
            ),
        );
    }
    let totals = view.totals;
    line(&mut out, format!("Total investment: {:.2}", totals.total_investment));
    line(&mut out, format!("Total value:      {:.2}", totals.total_value));
    line(&mut out, format!("Total profit:     {:.2}", totals.total_profit));
    match totals.profit_percent {
        Some(pct) => line(&mut out, format!("Profit percent:   {pct:.2}%")),
        None => out.push_str("Profit percent:   n/a\n"),
    }
    out
}

pub fn trade(view: &TradeView) -> String {
    let mut out = String::new();
    if let Some(message) = &view.message {
        line(&mut out, message.clone());
    }
    if let (Some(ticker), Some(info)) = (&view.selected, view.stock_info) {
        line(
            &mut out,
            format!(
                "{ticker}: price {:.2}, shares owned {}",
                info.current_price, info.shares_owned
            ),
        );
    }
    if let Some(balance) = view.balance {
        line(&mut out, format!("Balance: {balance}"));
    }
    if let Some(error) = &view.error {
        line(&mut out, format!("! {error}"));
    }
    out
}

pub fn session(session: &Session) -> String {
    format!(
        "user: {}\ntheme: {}\napi: {}\n",
        session.username.as_deref().unwrap_or("(not logged in)"),
        session.theme.map(|t| t.to_string()).unwrap_or_else(|| "(default)".to_string()),
        session.api_url
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use finboard_core::common::Theme;

    #[test]
    fn test_news_lists_tickers() {
        let items = sample_news();
        let text = news(&items);
        assert!(text.contains("[2024-08-30 14:30] Apple beats (AAPL, MSFT)"));
        assert_eq!(news(&[]), "No news.\n");
    }

    fn sample_news() -> Vec<NewsItem> {
        vec![NewsItem {
            title: "Apple beats".into(),
            content: String::new(),
            posted_on: chrono::NaiveDate::from_ymd_opt(2024, 8, 30)
                .and_then(|d| d.and_hms_opt(14, 30, 0))
                .unwrap(),
            tickers: Some("AAPL,MSFT".into()),
        }]
    }

    #[test]
    fn test_change_without_two_prices_is_not_zero() {
        assert_eq!(change(None), "n/a");
        assert_eq!(change(Some(10.0)), "+10.00%");
        assert_eq!(change(Some(-2.5)), "-2.50%");
        assert_eq!(change(Some(0.0)), "+0.00%");
    }

    #[test]
    fn test_session_summary() {
        let text = session(&Session {
            username: None,
            theme: Some(Theme::Dark),
            api_url: "http://localhost:5000".into(),
        });
        assert_eq!(
            text,
            "user: (not logged in)\ntheme: is-dark\napi: http://localhost:5000\n"
        );
    }
}
