use crate::cli::RateCardArgs;
use crate::infra::build_engine;
use capquote::config::AppConfig;
use capquote::error::AppError;
use capquote::export::{domestic_sheet, overseas_sheet, QuoteSheet, MOQ_NOTICE};
use capquote::pricing::money::{format_currency, format_quantity};
use capquote::pricing::{
    DomesticQuote, DomesticQuoteRequest, OverseasQuote, OverseasQuoteRequest,
    DEFAULT_SHIPPING_METHOD, DEFAULT_SHIPPING_SPEED,
};
use clap::Args;
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub(crate) struct DomesticArgs {
    /// Style number from the domestic catalog (e.g. 250)
    #[arg(long)]
    pub(crate) style: String,
    /// Number of hats ordered
    #[arg(long)]
    pub(crate) quantity: u32,
    /// Front decoration method
    #[arg(long)]
    pub(crate) front: Option<String>,
    /// Left side decoration method
    #[arg(long)]
    pub(crate) left: Option<String>,
    /// Right side decoration method
    #[arg(long)]
    pub(crate) right: Option<String>,
    /// Back decoration method
    #[arg(long)]
    pub(crate) back: Option<String>,
    /// Production speed
    #[arg(long, default_value = DEFAULT_SHIPPING_SPEED)]
    pub(crate) shipping_speed: String,
    /// Add a rope to every hat
    #[arg(long)]
    pub(crate) rope: bool,
    /// Number of embroidery files to digitize
    #[arg(long, default_value_t = 1)]
    pub(crate) dst_files: u32,
    /// Design number printed on the quote sheet
    #[arg(long)]
    pub(crate) design_number: Option<String>,
    /// Write the quote sheet as CSV into this directory
    #[arg(long)]
    pub(crate) csv: Option<PathBuf>,
    #[command(flatten)]
    pub(crate) rates: RateCardArgs,
}

#[derive(Args, Debug)]
pub(crate) struct OverseasArgs {
    /// Hat type from the overseas catalog (e.g. Classic)
    #[arg(long)]
    pub(crate) hat_type: String,
    /// Number of hats ordered
    #[arg(long)]
    pub(crate) quantity: u32,
    /// Front decoration method
    #[arg(long)]
    pub(crate) front: Option<String>,
    /// Left side decoration method
    #[arg(long)]
    pub(crate) left: Option<String>,
    /// Right side decoration method
    #[arg(long)]
    pub(crate) right: Option<String>,
    /// Back decoration method
    #[arg(long)]
    pub(crate) back: Option<String>,
    /// Visor decoration method
    #[arg(long)]
    pub(crate) visor: Option<String>,
    /// Design add-on (repeatable)
    #[arg(long = "addon")]
    pub(crate) addons: Vec<String>,
    /// Accessory (repeatable)
    #[arg(long = "accessory")]
    pub(crate) accessories: Vec<String>,
    /// Shipping method
    #[arg(long, default_value = DEFAULT_SHIPPING_METHOD)]
    pub(crate) shipping_method: String,
    /// Design number printed on the quote sheet
    #[arg(long)]
    pub(crate) design_number: Option<String>,
    /// Write the quote sheet as CSV into this directory
    #[arg(long)]
    pub(crate) csv: Option<PathBuf>,
    #[command(flatten)]
    pub(crate) rates: RateCardArgs,
}

pub(crate) fn run_domestic_quote(args: DomesticArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let engine = build_engine(&config, args.rates)?;

    let request = DomesticQuoteRequest {
        design_number: args.design_number,
        front_decoration: args.front,
        left_decoration: args.left,
        right_decoration: args.right,
        back_decoration: args.back,
        shipping_speed: args.shipping_speed,
        include_rope: args.rope,
        num_dst_files: args.dst_files,
        ..DomesticQuoteRequest::new(args.style, args.quantity)
    };
    request.validate()?;
    let quote = engine.domestic(&request)?;
    render_domestic(&quote);

    if let Some(directory) = args.csv {
        let sheet = domestic_sheet(&quote, request.design_number.as_deref())?;
        write_sheet(&directory, &sheet)?;
    }
    Ok(())
}

pub(crate) fn run_overseas_quote(args: OverseasArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let engine = build_engine(&config, args.rates)?;

    let request = OverseasQuoteRequest {
        design_number: args.design_number,
        front_decoration: args.front,
        left_decoration: args.left,
        right_decoration: args.right,
        back_decoration: args.back,
        visor_decoration: args.visor,
        design_addons: args.addons,
        accessories: args.accessories,
        shipping_method: args.shipping_method,
        ..OverseasQuoteRequest::new(args.hat_type, args.quantity)
    };
    request.validate()?;
    let quote = engine.overseas(&request)?;
    render_overseas(&quote);

    if let Some(directory) = args.csv {
        let sheet = overseas_sheet(&quote, request.design_number.as_deref())?;
        write_sheet(&directory, &sheet)?;
    }
    Ok(())
}

pub(crate) fn run_options(args: RateCardArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let engine = build_engine(&config, args)?;
    let rendered =
        serde_json::to_string_pretty(&engine.options()).map_err(std::io::Error::from)?;
    println!("{rendered}");
    Ok(())
}

fn write_sheet(directory: &Path, sheet: &QuoteSheet) -> Result<(), AppError> {
    let path = directory.join(&sheet.filename);
    std::fs::write(&path, &sheet.content)?;
    println!("\nQuote sheet written to {}", path.display());
    Ok(())
}

fn render_domestic(quote: &DomesticQuote) {
    println!(
        "Domestic quote: {} - {} ({})",
        quote.style_number, quote.style_name, quote.collection
    );
    println!(
        "Quantity {} | {}{}",
        format_quantity(quote.quantity),
        quote.shipping_speed,
        if quote.include_rope { " | rope" } else { "" }
    );
    println!(
        "\n{:>8}  {:>10}  {:>12}  {:>10}  {:>10}  {:>12}  {:>14}",
        "Break", "Blank", "Decoration", "Rush", "Per Piece", "Digitizing", "Total"
    );
    for row in &quote.price_breaks {
        let decoration = row.front_decoration_price
            + row.left_decoration_price
            + row.right_decoration_price
            + row.back_decoration_price
            + row.rope_price;
        println!(
            "{:>8}  {:>10}  {:>12}  {:>10}  {:>10}  {:>12}  {:>14}",
            format!("{}+", format_quantity(row.quantity_break)),
            format_currency(row.blank_price),
            format_currency(decoration),
            format_currency(row.rush_fee),
            format_currency(row.per_piece_price),
            format_currency(row.digitizing_fee),
            format_currency(row.total),
        );
    }

    match quote.applicable_break() {
        Some(row) => println!(
            "\nApplicable break {}+: {} per piece, {} total",
            format_quantity(row.quantity_break),
            format_currency(row.per_piece_price),
            format_currency(row.total)
        ),
        None => println!("\nNo price breaks available"),
    }
}

fn render_overseas(quote: &OverseasQuote) {
    println!("Overseas quote: {}", quote.hat_type);
    println!(
        "Quantity {} | {}",
        format_quantity(quote.quantity),
        quote.shipping_method
    );
    println!(
        "\n{:>8}  {:>10}  {:>10}  {:>10}  {:>14}",
        "Break", "Hat", "Shipping", "Per Piece", "Total"
    );
    for row in &quote.price_breaks {
        let label = format!("{}+", format_quantity(row.quantity_break));
        match (row.hat_subtotal, row.shipping_price, row.per_piece_price, row.total) {
            (Some(hat), Some(shipping), Some(per_piece), Some(total)) => println!(
                "{:>8}  {:>10}  {:>10}  {:>10}  {:>14}",
                label,
                format_currency(hat),
                format_currency(shipping),
                format_currency(per_piece),
                format_currency(total),
            ),
            _ => println!("{label:>8}  {MOQ_NOTICE}"),
        }
    }

    match quote.applicable_break() {
        Some(row) => println!(
            "\nApplicable break {}+: {} per piece, {} total",
            format_quantity(row.quantity_break),
            row.per_piece_price.map(format_currency).unwrap_or_default(),
            row.total.map(format_currency).unwrap_or_default()
        ),
        None => println!("\nNo break meets MOQ for these selections"),
    }
}
