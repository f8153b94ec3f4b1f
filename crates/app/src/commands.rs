use crate::cli::{Commands, SettingsAction};
use crate::{render, traffic};
use finboard_core::common::normalize_ticker;
use finboard_core::market::entity::NewsQuery;
use finboard_core::trade::entity::TradeDirection;
use finboard_views::AppContext;
use finboard_views::dashboard::DashboardView;
use finboard_views::portfolio::PortfolioView;
use finboard_views::settings::TeamSettingsView;
use finboard_views::stocks::StocksView;
use finboard_views::trade::{TradeOutcome, TradeView};
use std::error::Error;
use tracing::info;

/// # Summary
/// 执行一条命令并把结果打印到标准输出。
///
/// # Logic
/// 1. 构造对应的视图并加载数据。
/// 2. 视图内的错误随输出一并打印；直接调用网关的命令把错误向上返回。
///
/// # Arguments
/// * `ctx` - 共享依赖。
/// * `command` - 已解析的命令。
pub async fn run(ctx: &AppContext, command: Commands) -> Result<(), Box<dyn Error>> {
    match command {
        Commands::Dashboard { ticker } => {
            let mut view = DashboardView::new(ctx.clone());
            if let Some(ticker) = ticker.as_deref().and_then(normalize_ticker) {
                view = view.with_focus(ticker);
            }
            view.load().await;
            print!("{}", render::dashboard(&view));
        }

        Commands::Stocks { ticker } => {
            let mut view = StocksView::new(ctx.clone());
            view.mount();
            view.fetch(&ticker).await;
            print!("{}", render::stocks(&view));
        }

        Commands::Portfolio => {
            let mut view = PortfolioView::new(ctx.clone());
            view.load().await;
            print!("{}", render::portfolio(&view));
        }

        Commands::News {
            tickers,
            from,
            to,
            sort,
            limit,
        } => {
            let query = NewsQuery {
                tickers: tickers.iter().filter_map(|t| normalize_ticker(t)).collect(),
                time_from: from,
                time_to: to,
                sort,
                limit,
            };
            let items = ctx.gateway.market_news(&query).await?;
            print!("{}", render::news(&items));
        }

        Commands::Metrics => {
            let text = ctx.gateway.metrics().await?;
            print!("{text}");
        }

        Commands::Search { query } => {
            let mut view = TradeView::new(ctx.clone());
            view.search(&query).await;
            if view.suggestions.is_empty() {
                println!("No matches.");
            }
            for ticker in &view.suggestions {
                println!("{ticker}");
            }
        }

        Commands::Buy { ticker, shares } => {
            trade(ctx, &ticker, shares, TradeDirection::Buy).await;
        }

        Commands::Sell { ticker, shares } => {
            trade(ctx, &ticker, shares, TradeDirection::Sell).await;
        }

        Commands::Settings { action } => match action {
            SettingsAction::Show => {
                let session = ctx.store.load_session().await?;
                print!("{}", render::session(&session));
                println!("active: {}", ctx.gateway.base_url());
            }
            SettingsAction::SetUrl { url } => {
                let mut view = TeamSettingsView::new(ctx.clone());
                if view.save(&url).await {
                    println!("{}", view.message.unwrap_or_default());
                } else {
                    return Err(view.error.unwrap_or_default().into());
                }
            }
        },

        Commands::SimulateTraffic {
            requests,
            min_delay,
            max_delay,
        } => {
            info!("Simulating {} request(s) against {}", requests, ctx.gateway.base_url());
            let report = traffic::simulate(ctx.gateway.as_ref(), requests, min_delay, max_delay).await;
            println!(
                "succeeded: {}, rejected: {}, unreachable: {}",
                report.succeeded, report.rejected, report.unreachable
            );
        }

        Commands::Shell => println!("Already in the shell."),
    }

    Ok(())
}

/// 选中标的、提交买卖并打印刷新后的交易视图。
async fn trade(ctx: &AppContext, ticker: &str, shares: u32, direction: TradeDirection) {
    let mut view = TradeView::new(ctx.clone());
    view.select(ticker).await;
    view.set_shares(shares);
    let outcome = match direction {
        TradeDirection::Buy => view.buy().await,
        TradeDirection::Sell => view.sell().await,
    };
    if outcome == TradeOutcome::Ignored {
        println!("Nothing to do: pick a ticker and a non-zero share count.");
    }
    print!("{}", render::trade(&view));
}
