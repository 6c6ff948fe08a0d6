//! Compare two vendor quotations end to end

use pr_compare::utils::MemoryExtractor;
use pr_compare::{ComparisonConfig, ComparisonService, DefaultDocumentValidator, ItemStatus};

const TECH_SUPPLIES: &str = r#"```json
{
    "vendor_name": "Tech Supplies Inc.",
    "pr_id": "PR-1001",
    "date": "2024-05-10",
    "currency": "USD",
    "items": [
        {"name": "UltraWidget 3000", "qty": 10, "unit_price": 120.00, "total_price": 1200.00},
        {"name": "Power Adapter", "qty": 10, "unit_price": 15.50, "total_price": 155.00},
        {"name": "USB-C Cable", "qty": 20, "unit_price": 8.00, "total_price": 160.00}
    ],
    "grand_total": 1515.00
}
```"#;

const GADGET_WORLD: &str = r#"{
    "vendor_name": "Gadget World",
    "pr_id": "GW-7781",
    "date": "05/12/2024",
    "currency": "USD",
    "items": [
        {"name": "ultrawidget 3000", "qty": 10,
         "unit_price": "$115.00", "total_price": "$1,150.00"},
        {"name": "Power  Adapter", "qty": 10, "unit_price": 17.25, "total_price": 172.50},
        {"name": "Carry Case", "qty": 10, "unit_price": 12.00, "total_price": 120.00}
    ],
    "grand_total": 1442.50
}"#;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    println!("📄 PR Compare - Vendor Quotation Example\n");

    let extractor = MemoryExtractor::new()
        .with_response("tech_supplies.pdf", TECH_SUPPLIES)
        .with_response("gadget_world.pdf", GADGET_WORLD);

    let config = ComparisonConfig {
        report_presence: true,
        ..ComparisonConfig::default()
    };
    let service =
        ComparisonService::with_validator(extractor, Box::new(DefaultDocumentValidator), config);

    let result = service
        .compare_documents("tech_supplies.pdf", "gadget_world.pdf")
        .await?;
    let report = &result.report;

    println!(
        "Comparing {} ({}) with {} ({})\n",
        report.vendor1.as_deref().unwrap_or("unknown vendor"),
        report.pr1_id.as_deref().unwrap_or("-"),
        report.vendor2.as_deref().unwrap_or("unknown vendor"),
        report.pr2_id.as_deref().unwrap_or("-"),
    );

    println!("📊 Item Comparison:");
    for entry in &report.item_comparison {
        let price = |p: &Option<bigdecimal::BigDecimal>| {
            p.as_ref()
                .map(|p| format!("${}", p))
                .unwrap_or_else(|| "-".to_string())
        };
        let diff = entry
            .diff
            .as_ref()
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string());
        let label = match entry.status {
            ItemStatus::Pr1Cheaper => "cheaper at vendor 1",
            ItemStatus::Pr2Cheaper => "cheaper at vendor 2",
            ItemStatus::Equal => "same price",
            ItemStatus::Pr1Only => "only quoted by vendor 1",
            ItemStatus::Pr2Only => "only quoted by vendor 2",
            ItemStatus::Match => "matched",
        };
        println!(
            "  {:<20} {:>10} {:>10} {:>8}  {}",
            entry.name,
            price(&entry.price1),
            price(&entry.price2),
            diff,
            label
        );
    }
    println!();

    for (index, pr) in [&result.pr1, &result.pr2].iter().enumerate() {
        for item in &pr.items {
            if let Some(delta) = item.line_total_mismatch() {
                println!(
                    "  ⚠ PR{} line total for '{}' differs from qty x price by {}",
                    index + 1,
                    item.name,
                    delta
                );
            }
        }
        if let Some(date) = pr.parsed_date() {
            println!("  PR{} dated {}", index + 1, date);
        }
    }
    println!();

    println!("💰 Total difference (vendor 2 - vendor 1): ${}", report.total_diff);
    println!(
        "✓ Cheaper option: {}",
        report.cheaper_option.as_deref().unwrap_or("unnamed vendor")
    );
    println!("\n{}", serde_json::to_string_pretty(report)?);

    Ok(())
}
