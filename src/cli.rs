//! Command-line surface over the order services.

use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use uuid::Uuid;

use crate::config::{self, AppConfig};
use crate::entities::{Order, ShippingStatus};
use crate::ingest;
use crate::repositories::{JsonFileStore, OrderStore};
use crate::services::{ImportService, ListQuery, OrderFilter, OrderService, SortKey};

#[derive(Parser)]
#[command(
    name = "order-desk",
    about = "Order desk: spreadsheet order intake, listing and shipping instructions",
    version
)]
pub struct Cli {
    #[arg(
        long,
        global = true,
        help = "Path of the JSON order collection (overrides configuration)"
    )]
    store: Option<PathBuf>,
    #[arg(long, global = true, help = "Log level filter (overrides configuration)")]
    log_level: Option<String>,
    #[arg(
        long,
        global = true,
        action = ArgAction::SetTrue,
        help = "Emit logs as JSON"
    )]
    log_json: bool,
    #[arg(
        long,
        global = true,
        action = ArgAction::SetTrue,
        help = "Render command output as pretty JSON when available"
    )]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ingest a workbook of order rows into the collection
    Upload(UploadArgs),
    /// List orders with optional filters, sorting and pagination
    List(ListArgs),
    /// Show one order in full
    Show(ShowArgs),
    /// Issue the shipping instruction for the given orders
    Ship(ShipArgs),
}

#[derive(Args)]
struct UploadArgs {
    #[arg(help = "Workbook (.xlsx or .xls) holding the order rows")]
    file: PathBuf,
}

#[derive(Args)]
struct ListArgs {
    #[arg(long, help = "Filter by order number (exact match)")]
    order_number: Option<String>,
    #[arg(long, help = "Filter by customer name (case-insensitive substring)")]
    customer: Option<String>,
    #[arg(
        long,
        value_parser = parse_cli_date,
        help = "Keep orders dated on or after this day (YYYY-MM-DD)"
    )]
    from: Option<NaiveDate>,
    #[arg(
        long,
        value_parser = parse_cli_date,
        help = "Keep orders dated on or before this day (YYYY-MM-DD)"
    )]
    to: Option<NaiveDate>,
    #[arg(
        long,
        value_parser = parse_status,
        help = "Filter by shipping status (unshipped, shipped, 未出荷, 出荷済)"
    )]
    status: Option<ShippingStatus>,
    #[arg(long, value_enum, help = "Column to sort by")]
    sort: Option<SortKeyArg>,
    #[arg(long, action = ArgAction::SetTrue, help = "Sort in descending order")]
    desc: bool,
    #[arg(long, default_value_t = 1, help = "Page number (1-indexed)")]
    page: u64,
    #[arg(long, help = "Rows per page (defaults to the configured page size)")]
    per_page: Option<u64>,
}

#[derive(Args)]
struct ShowArgs {
    #[arg(help = "Order identifier (UUID) or order number")]
    key: String,
}

#[derive(Args)]
struct ShipArgs {
    #[arg(
        required = true,
        value_parser = clap::value_parser!(Uuid),
        help = "Identifiers of the orders to ship"
    )]
    ids: Vec<Uuid>,
}

#[derive(Clone, Copy, ValueEnum)]
enum SortKeyArg {
    OrderNumber,
    OrderDate,
    CustomerName,
    ProductName,
    Quantity,
    Status,
}

impl From<SortKeyArg> for SortKey {
    fn from(value: SortKeyArg) -> Self {
        match value {
            SortKeyArg::OrderNumber => SortKey::OrderNumber,
            SortKeyArg::OrderDate => SortKey::OrderDate,
            SortKeyArg::CustomerName => SortKey::CustomerName,
            SortKeyArg::ProductName => SortKey::ProductName,
            SortKeyArg::Quantity => SortKey::Quantity,
            SortKeyArg::Status => SortKey::Status,
        }
    }
}

struct CliContext {
    config: AppConfig,
    store: Arc<dyn OrderStore>,
}

impl CliContext {
    fn initialize(cli: &Cli) -> Result<Self> {
        let mut config = config::load_config().context("failed to load application config")?;
        if let Some(path) = &cli.store {
            config.store_path = path.clone();
        }
        if let Some(level) = &cli.log_level {
            config.log_level = level.clone();
        }
        if cli.log_json {
            config.log_json = true;
        }
        config::init_tracing(&config.log_level, config.log_json);

        let store = Arc::new(JsonFileStore::new(&config.store_path));
        Ok(Self { config, store })
    }

    fn import_service(&self) -> ImportService {
        ImportService::new(self.store.clone())
    }

    fn order_service(&self) -> OrderService {
        OrderService::new(self.store.clone())
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let context = CliContext::initialize(&cli)?;

    match cli.command {
        Commands::Upload(args) => handle_upload(&context, args, cli.json),
        Commands::List(args) => handle_list(&context, args, cli.json),
        Commands::Show(args) => handle_show(&context, args, cli.json),
        Commands::Ship(args) => handle_ship(&context, args, cli.json),
    }
}

fn handle_upload(context: &CliContext, args: UploadArgs, json: bool) -> Result<()> {
    let report = context
        .import_service()
        .upload(&args.file)
        .map_err(|err| anyhow!("{}", err.user_message()))?;

    if json {
        print_json(&report)
    } else {
        println!("{}", report.summary());
        Ok(())
    }
}

fn handle_list(context: &CliContext, args: ListArgs, json: bool) -> Result<()> {
    let query = ListQuery {
        filter: OrderFilter {
            order_number: args.order_number,
            customer_name: args.customer,
            date_from: args.from,
            date_to: args.to,
            status: args.status,
        },
        sort: args.sort.map(SortKey::from),
        descending: args.desc,
        page: args.page,
        limit: args.per_page.unwrap_or(context.config.page_size),
    };

    let response = context
        .order_service()
        .list(&query)
        .context("failed to list orders")?;

    if json {
        print_json(&response)
    } else {
        println!(
            "Orders page {}/{} ({} per page) total {}",
            response.page, response.total_pages, response.limit, response.total
        );
        for order in &response.items {
            render_order(order);
        }
        Ok(())
    }
}

fn handle_show(context: &CliContext, args: ShowArgs, json: bool) -> Result<()> {
    let service = context.order_service();
    let order = match Uuid::parse_str(&args.key) {
        Ok(id) => service.get(id),
        Err(_) => service.get_by_order_number(&args.key),
    }
    .with_context(|| format!("failed to fetch order {}", args.key))?;

    if json {
        print_json(&order)
    } else {
        render_order_detail(&order);
        Ok(())
    }
}

fn handle_ship(context: &CliContext, args: ShipArgs, json: bool) -> Result<()> {
    let shipped = context
        .order_service()
        .ship(&args.ids)
        .context("failed to apply shipping instruction")?;

    if json {
        print_json(&serde_json::json!({
            "selected": args.ids.len(),
            "shipped": shipped
        }))
    } else {
        println!("出荷指示が完了しました（{shipped}件）");
        Ok(())
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn render_order(order: &Order) {
    println!(
        "- {} • {} • {} • {} • 数量 {} • {}",
        order.order_number,
        order.order_date,
        order.customer_name,
        order.product_name,
        order.quantity,
        order.shipping_status.label()
    );
}

fn render_order_detail(order: &Order) {
    println!("受注番号: {}", order.order_number);
    println!("受注日: {}", order.order_date);
    println!("顧客コード: {}", order.customer_code);
    println!("顧客名: {}", order.customer_name);
    println!("商品コード: {}", order.product_code);
    println!("商品名: {}", order.product_name);
    println!("数量: {}", order.quantity);
    println!("単価: {}", order.unit_price);
    println!("金額: {}", order.amount);
    println!("納期: {}", format_optional_date(order.delivery_date));
    println!("配送先住所: {}", order.delivery_address);
    println!("配送先電話番号: {}", order.delivery_phone);
    println!("ステータス: {}", order.shipping_status.label());
    println!("出荷日: {}", format_optional_date(order.shipping_date));
    println!("備考: {}", order.remarks);
}

fn format_optional_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.to_string()).unwrap_or_default()
}

fn parse_cli_date(raw: &str) -> Result<NaiveDate, String> {
    ingest::parse_date(raw).ok_or_else(|| format!("invalid date '{raw}', expected YYYY-MM-DD"))
}

fn parse_status(raw: &str) -> Result<ShippingStatus, String> {
    let value = raw.trim();
    if let Ok(status) = ShippingStatus::from_str(value) {
        return Ok(status);
    }
    match value {
        "未出荷" => Ok(ShippingStatus::Unshipped),
        "出荷済" => Ok(ShippingStatus::Shipped),
        _ => Err(format!(
            "invalid status '{raw}', expected unshipped, shipped, 未出荷 or 出荷済"
        )),
    }
}
