//! Ripe FX Quoter CLI
//!
//! Fetches live rates (with fallback) and prints a transparent fee
//! breakdown for one conversion, alongside the legacy-provider
//! comparison.

use clap::Parser;
use rust_decimal::Decimal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ripefx_common::{Currency, Stablecoin};
use ripefx_engine::{validate_amount, ConversionResult};
use ripefx_quoter::{FxService, QuoterConfig};

/// Ripe FX quoting CLI
#[derive(Parser, Debug)]
#[command(name = "quoter")]
#[command(about = "Quote a stablecoin to local-currency payout with full fee breakdown")]
struct Args {
    /// Amount to quote (stablecoin units, or fiat with --receive)
    #[arg(short, long, default_value = "100")]
    amount: String,

    /// Payout currency (PHP, THB, IDR, MYR)
    #[arg(short, long, default_value = "PHP")]
    currency: String,

    /// Stablecoin being sent (USDC, USDT, USDG)
    #[arg(short, long, default_value = "USDC")]
    stablecoin: String,

    /// Treat the amount as the fiat the recipient should get
    #[arg(long)]
    receive: bool,

    /// Skip the live fetch and quote from seed rates
    #[arg(long)]
    offline: bool,

    /// Hide the legacy-provider comparison
    #[arg(long)]
    no_compare: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = QuoterConfig::from_env();
    if let Err(e) = config.validate() {
        return Err(anyhow::anyhow!("Configuration error: {}", e));
    }

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| config.log_level.clone()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let currency: Currency = args.currency.parse()?;
    let stablecoin: Stablecoin = args.stablecoin.parse()?;
    let amount = validate_amount(&args.amount)?;
    if amount <= Decimal::ZERO {
        return Err(anyhow::anyhow!("Enter an amount greater than zero"));
    }

    let service = FxService::new(&config);

    if args.offline {
        info!("offline mode, quoting from seed rates");
    } else {
        match service.acquire_rates().await {
            Ok(source) => info!(source = %source, "live rates acquired"),
            Err(error) => warn!(error = %error, "using cached rates"),
        }
    }

    let quote = if args.receive {
        service.convert_reverse(amount, currency)
    } else {
        service.convert_forward(amount, currency)
    };
    let Some(quote) = quote else {
        return Err(anyhow::anyhow!("Amount is not convertible"));
    };

    print_quote(&quote, currency, stablecoin, service.is_stale());

    if !args.no_compare {
        let sent = quote.required_amount.unwrap_or(amount);
        if let Some(legacy) = service.convert_legacy(sent, currency) {
            let savings = service.compute_savings(&quote, &legacy);
            println!();
            println!("Legacy provider would pay: {}", fiat(legacy.net_fiat, currency));
            if savings.ripe_better {
                println!(
                    "You receive {} more with Ripe ({:.1}% better)",
                    fiat(savings.amount, currency),
                    savings.percent
                );
            }
        }
    }

    Ok(())
}

fn print_quote(
    quote: &ConversionResult,
    currency: Currency,
    stablecoin: Stablecoin,
    stale: bool,
) {
    let sent = quote
        .required_amount
        .unwrap_or(quote.gross_fiat / quote.customer_rate);

    println!("You send:        {} {}", sent.round_dp(2), stablecoin);
    println!(
        "Gross at {}:  {}",
        quote.customer_rate,
        fiat(quote.gross_fiat, currency)
    );
    println!(
        "Transaction fee: -{}  ({} {})",
        fiat(quote.transaction_fee_fiat, currency),
        quote.transaction_fee,
        stablecoin
    );
    println!("Network fee:     -{}", fiat(quote.network_fee_fiat, currency));
    println!(
        "FX spread:       {} ({:.2}%, built into rate)",
        fiat(quote.fx_spread, currency),
        quote.fx_spread_percent
    );
    println!("Recipient gets:  {}", fiat(quote.net_fiat, currency));
    println!(
        "Effective rate:  {} per {} (interbank {})",
        quote.effective_rate.round_dp(4),
        stablecoin,
        quote.interbank_rate
    );
    println!(
        "Total fees:      {} ({:.2}%)",
        fiat(quote.total_fees_fiat, currency),
        quote.total_fees_percent
    );
    if let Some(target) = quote.target_fiat {
        println!("Requested:       {}", fiat(target, currency));
    }
    if stale {
        println!("(rates are cached and may be stale)");
    }
}

fn fiat(amount: Decimal, currency: Currency) -> String {
    format!(
        "{}{}",
        currency.symbol(),
        amount.round_dp(currency.decimal_places())
    )
}
