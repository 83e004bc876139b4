mod common;

use std::io::Cursor;

use anyhow::Result;
use common::test_service;
use loterica::application::LedgerService;
use loterica::cli::{Flow, Session};
use loterica::config::DisplayConfig;
use tempfile::TempDir;

/// Run a script against a session and return what it printed
async fn run_script(service: &LedgerService, script: &str) -> Result<String> {
    let display = DisplayConfig::default();
    let mut session = Session::new(service, &display, Vec::new());
    session.run(Cursor::new(script), false).await?;
    Ok(String::from_utf8(session.into_output())?)
}

#[tokio::test]
async fn test_cash_add_renders_table() -> Result<()> {
    let service = test_service().await?;
    let output = run_script(
        &service,
        "cash add --date 2024-01-01 --operator Ana --drawer drawer1 --inflow 100.00 --outflow 20.00 --closing 80\n",
    )
    .await?;

    assert!(output.contains("Saved cash drawer entry #1 (Drawer 1, Ana)"));
    assert!(output.contains("Cash drawers (amounts in R$)"));
    assert!(output.contains("2024-01-01"));
    assert!(output.contains("100.00"));

    let entries = service.cash_entries().await?;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].inflow_amount, 10000);
    assert_eq!(entries[0].outflow_amount, 2000);
    assert_eq!(entries[0].closing_balance, 8000);
    Ok(())
}

#[tokio::test]
async fn test_quoted_operator_and_portuguese_labels() -> Result<()> {
    let service = test_service().await?;
    run_script(
        &service,
        "caixa add --date 2024-01-01 -o 'Ana Maria' -d 'Caixa Interno' --sale-type saque --withdrawal 50,00\n",
    )
    .await?;

    let entries = service.cash_entries().await?;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].operator, "Ana Maria");
    assert_eq!(entries[0].drawer, loterica::DrawerId::InternalDrawer);
    assert_eq!(entries[0].sale_type, loterica::SaleType::Withdrawal);
    assert_eq!(entries[0].withdrawal_amount, 5000);
    Ok(())
}

#[tokio::test]
async fn test_vault_add_and_list() -> Result<()> {
    let service = test_service().await?;
    let output = run_script(
        &service,
        "vault add --date 2024-02-10 -d Reforço -t entrada -a 50\n\
         cofre add --date 2024-02-10 -d Sangria -t saida -a 30\n\
         vault list --format csv\n",
    )
    .await?;

    assert!(output.contains("Saved vault movement #1 (inflow 50.00)"));
    assert!(output.contains("Saved vault movement #2 (outflow 30.00)"));
    assert!(output.contains("2,2024-02-10,Sangria,outflow,0.00,30.00,0.00"));

    let movements = service.vault_movements().await?;
    assert_eq!(movements.len(), 2);
    assert!(movements.iter().all(|m| m.running_balance == 0));
    Ok(())
}

#[tokio::test]
async fn test_bad_commands_do_not_stop_the_session() -> Result<()> {
    let service = test_service().await?;
    let output = run_script(
        &service,
        "cash add --operator Ana --drawer caixa9\n\
         cash add --operator Ana --drawer drawer1 --inflow 1.234\n\
         cash add --operator '' --drawer drawer1\n\
         cash add --operator 'Ana\n\
         frobnicate\n\
         cash add --date 2024-01-01 --operator Ana --drawer drawer2 --inflow 10\n",
    )
    .await?;

    assert!(output.contains("invalid drawer 'caixa9'"));
    assert!(output.contains("more than two decimal places"));
    assert!(output.contains("Error: Invalid record: operator is required"));
    assert!(output.contains("Error: unterminated ' quote"));
    assert!(output.contains("frobnicate"));

    // Only the last, valid line was stored
    let entries = service.cash_entries().await?;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].sequence, 1);
    Ok(())
}

#[tokio::test]
async fn test_chart_on_empty_session() -> Result<()> {
    let service = test_service().await?;
    let output = run_script(&service, "chart\n").await?;
    assert_eq!(output, "No cash drawer entries to chart.\n");
    Ok(())
}

#[tokio::test]
async fn test_chart_bars() -> Result<()> {
    let service = test_service().await?;
    let output = run_script(
        &service,
        "cash add --date 2024-01-01 -o Ana -d 1 --inflow 100 --outflow 50\n\
         cash add --date 2024-01-02 -o Ana -d 1 --inflow 25\n\
         chart\n",
    )
    .await?;

    let chart_start = output
        .find("Inflow (#) and outflow (=) per day, in R$")
        .expect("chart header");
    let chart = &output[chart_start..];
    assert!(chart.contains(&format!("2024-01-01  in  {} 100.00", "#".repeat(40))));
    assert!(chart.contains(&format!("out {} 50.00", "=".repeat(20))));
    assert!(chart.contains(&format!("2024-01-02  in  {} 25.00", "#".repeat(10))));
    Ok(())
}

#[tokio::test]
async fn test_report_is_empty_for_any_period() -> Result<()> {
    let service = test_service().await?;
    let output = run_script(
        &service,
        "cash add --date 2024-01-01 -o Ana -d 1 --inflow 100\n\
         report --period semanal\n",
    )
    .await?;

    assert!(output.contains("Period: weekly"));
    assert!(output.contains("(no report rows)"));
    Ok(())
}

#[tokio::test]
async fn test_quit_stops_reading() -> Result<()> {
    let service = test_service().await?;
    let lines = {
        let display = DisplayConfig::default();
        let mut session = Session::new(&service, &display, Vec::new());
        session
            .run(
                Cursor::new("status\nquit\ncash add -o Ana -d 1 --inflow 5\n"),
                false,
            )
            .await?
    };

    assert_eq!(lines, 2);
    assert!(service.cash_entries().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_execute_line_flow() -> Result<()> {
    let service = test_service().await?;
    let display = DisplayConfig::default();
    let mut session = Session::new(&service, &display, Vec::new());

    assert_eq!(session.execute_line("").await?, Flow::Continue);
    assert_eq!(session.execute_line("# a comment").await?, Flow::Continue);
    assert_eq!(session.execute_line("status").await?, Flow::Continue);
    assert_eq!(session.execute_line("exit").await?, Flow::Quit);

    let output = String::from_utf8(session.into_output())?;
    assert_eq!(
        output,
        "Session: 0 cash drawer entries, 0 vault movements\n"
    );
    Ok(())
}

#[tokio::test]
async fn test_export_command_writes_file() -> Result<()> {
    let service = test_service().await?;
    let temp = TempDir::new()?;
    let path = temp.path().join("caixa.csv");

    let output = run_script(
        &service,
        &format!(
            "cash add --date 2024-01-01 -o Ana -d 1 --inflow 100 --outflow 20 --closing 80\n\
             export cash --output '{}'\n",
            path.display()
        ),
    )
    .await?;

    assert!(output.contains("Exported 1 cash drawer entries"));
    let csv = std::fs::read_to_string(&path)?;
    assert_eq!(csv.lines().count(), 2);
    assert!(csv.contains("1,2024-01-01,Ana,drawer1,other,0.00,0.00,0.00,100.00,20.00,80.00"));
    Ok(())
}

#[tokio::test]
async fn test_export_to_missing_directory_keeps_session() -> Result<()> {
    let service = test_service().await?;
    let temp = TempDir::new()?;
    let path = temp.path().join("missing").join("caixa.csv");

    let output = run_script(
        &service,
        &format!(
            "cash add --date 2024-01-01 -o Ana -d 1 --inflow 100\n\
             export cash --output '{}'\n\
             cash add --date 2024-01-01 -o Bia -d 2 --inflow 50\n",
            path.display()
        ),
    )
    .await?;

    assert!(output.contains("Error: failed to create output file"));
    assert!(output.contains("Saved cash drawer entry #2 (Drawer 2, Bia)"));
    assert!(!path.exists());
    assert_eq!(service.cash_entries().await?.len(), 2);
    Ok(())
}

#[tokio::test]
async fn test_oversized_amount_is_rejected_and_chart_still_works() -> Result<()> {
    let service = test_service().await?;
    let output = run_script(
        &service,
        "cash add --date 2024-01-01 -o Ana -d 1 --inflow 50000000000000000\n\
         cash add --date 2024-01-01 -o Ana -d 1 --inflow 1000000000\n\
         cash add --date 2024-01-01 -o Bia -d 2 --inflow 1000000000\n\
         chart --format table\n",
    )
    .await?;

    assert!(output.contains("above the maximum"));
    assert!(output.contains("2000000000.00"));
    assert_eq!(service.cash_entries().await?.len(), 2);
    Ok(())
}
