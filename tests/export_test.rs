mod common;

use anyhow::Result;
use common::{cash_form, test_service, vault_form};
use loterica::domain::{DrawerId, MovementType, Period};
use loterica::io::{Exporter, SessionSnapshot};
use tempfile::TempDir;

#[tokio::test]
async fn test_cash_csv_has_header_and_one_row_per_entry() -> Result<()> {
    let service = test_service().await?;
    service
        .record_cash_entry(cash_form("2024-01-01", "Ana", DrawerId::Drawer1, 10000, 2000))
        .await?;
    service
        .record_cash_entry(cash_form("2024-01-02", "Bruno", DrawerId::Drawer2, 550, 0))
        .await?;

    let mut out = Vec::new();
    let count = Exporter::new(&service)
        .export_cash_entries_csv(&mut out)
        .await?;
    let csv = String::from_utf8(out)?;
    let lines: Vec<&str> = csv.lines().collect();

    assert_eq!(count, 2);
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("sequence,date,operator,drawer,sale_type"));
    assert_eq!(
        lines[1],
        "1,2024-01-01,Ana,drawer1,other,0.00,0.00,0.00,100.00,20.00,80.00,0,0,0,0"
    );
    assert_eq!(
        lines[2],
        "2,2024-01-02,Bruno,drawer2,other,0.00,0.00,0.00,5.50,0.00,5.50,0,0,0,0"
    );
    Ok(())
}

#[tokio::test]
async fn test_vault_csv() -> Result<()> {
    let service = test_service().await?;
    service
        .record_vault_movement(vault_form("2024-01-01", "Sangria, caixa 1", MovementType::Outflow, 3000))
        .await?;

    let mut out = Vec::new();
    Exporter::new(&service)
        .export_vault_movements_csv(&mut out)
        .await?;
    let csv = String::from_utf8(out)?;

    assert_eq!(
        csv,
        "sequence,date,description,type,inflow,outflow,balance\n\
         1,2024-01-01,\"Sangria, caixa 1\",outflow,0.00,30.00,0.00\n"
    );
    Ok(())
}

#[tokio::test]
async fn test_chart_csv() -> Result<()> {
    let service = test_service().await?;
    service
        .record_cash_entry(cash_form("2024-01-01", "Ana", DrawerId::Drawer1, 100, 20))
        .await?;
    service
        .record_cash_entry(cash_form("2024-01-01", "Bruno", DrawerId::Drawer2, 50, 5))
        .await?;

    let mut out = Vec::new();
    let count = Exporter::new(&service).export_chart_csv(&mut out).await?;

    assert_eq!(count, 1);
    assert_eq!(
        String::from_utf8(out)?,
        "date,total_inflow,total_outflow\n2024-01-01,1.50,0.25\n"
    );
    Ok(())
}

#[tokio::test]
async fn test_report_csv_is_header_only() -> Result<()> {
    let service = test_service().await?;
    let mut out = Vec::new();
    let count = Exporter::new(&service)
        .export_report_csv(Period::Monthly, &mut out)
        .await?;

    assert_eq!(count, 0);
    assert_eq!(
        String::from_utf8(out)?,
        "period,total_inflow,total_outflow,closing_balance\n"
    );
    Ok(())
}

#[tokio::test]
async fn test_session_json_snapshot_to_file() -> Result<()> {
    let service = test_service().await?;
    service
        .record_cash_entry(cash_form("2024-01-01", "Ana", DrawerId::Drawer1, 100, 20))
        .await?;
    service
        .record_vault_movement(vault_form("2024-01-01", "Reforço", MovementType::Inflow, 5000))
        .await?;

    let temp = TempDir::new()?;
    let path = temp.path().join("session.json");
    let file = std::fs::File::create(&path)?;
    let snapshot = Exporter::new(&service).export_session_json(file).await?;
    assert_eq!(snapshot.cash_entries.len(), 1);
    assert_eq!(snapshot.vault_movements.len(), 1);

    let contents = std::fs::read_to_string(&path)?;
    let parsed: SessionSnapshot = serde_json::from_str(&contents)?;
    assert_eq!(parsed.version, env!("CARGO_PKG_VERSION"));
    assert_eq!(parsed.cash_entries, snapshot.cash_entries);
    assert_eq!(parsed.vault_movements, snapshot.vault_movements);
    assert!(parsed.report_summaries.is_empty());
    Ok(())
}
