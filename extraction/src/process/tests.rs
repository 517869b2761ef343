use std::path::Path;

use googletest::prelude::*;
use mockall::mock;
use testutils::anyhow_downcasts_to;

use super::*;
use crate::{
    error::MalformedInput,
    segment::RegionSpec,
    table::Table,
    testutil::{PageBuilder, table},
};

mock! {
    pub Cells {}

    impl CellExtractor for Cells {
        fn extract_cell_grids(
            &self,
            pdf_path: &Path,
            regions: &[RegionSpec],
        ) -> anyhow::Result<Vec<Table>>;
    }
}

/// January statement: page 1 continues account 111 from page 0, then starts account 222.
fn two_account_document() -> anyhow::Result<Document> {
    Document::new(
        Path::new("/statements/RELEVES_111_20230110.pdf"),
        vec![
            PageBuilder::new(0)
                .table_header(120.0, "Compte courant N° 111")
                .soft_end(700.0)
                .build(),
            PageBuilder::new(1)
                .table_header(80.0, "Compte courant N° 111")
                .hard_end(300.0)
                .table_header(400.0, "Livret A N° 222")
                .hard_end(600.0)
                .build(),
        ],
    )
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

fn record(account: &str, date: NaiveDate, description: &str, value: Decimal) -> FinalRecord {
    FinalRecord {
        account: account.to_string(),
        date,
        description: description.to_string(),
        value,
    }
}

#[gtest]
fn test_document_reads_period_from_file_name() -> anyhow::Result<()> {
    let document = two_account_document()?;

    expect_that!(document.name, eq("RELEVES_111_20230110.pdf"));
    expect_that!(
        document.period,
        eq(StatementPeriod {
            year: 2023,
            month: 1
        })
    );
    Ok(())
}

#[gtest]
fn test_document_without_period_is_malformed() {
    expect_that!(
        Document::new(Path::new("scan.pdf"), vec![]),
        err(anyhow_downcasts_to::<MalformedInput, _>(eq(
            MalformedInput::NoStatementPeriod
        )))
    );
}

#[gtest]
fn test_regions_of_two_account_document() -> anyhow::Result<()> {
    let processor = StatementProcessor::new(Layout::default(), MockCells::new());

    let regions = processor.regions(&two_account_document()?)?;

    let summary: Vec<Option<(usize, &str)>> = regions
        .iter()
        .map(|region| match region {
            TableRegion::Region(region) => Some((region.page, region.account.as_str())),
            TableRegion::Break => None,
        })
        .collect();
    expect_that!(
        summary,
        eq(&vec![Some((0, "111")), Some((1, "111")), None, Some((1, "222")), None])
    );
    Ok(())
}

#[gtest]
#[test_log::test]
fn test_process_two_account_document() -> anyhow::Result<()> {
    // GIVEN: the cell extractor returns one grid for each of the three regions.
    let mut cells = MockCells::new();
    cells
        .expect_extract_cell_grids()
        .withf(|pdf_path, regions| {
            let pages: Vec<i32> = regions.iter().map(|region| region.page).collect();
            pdf_path.ends_with("RELEVES_111_20230110.pdf") && pages == [1, 2, 2]
        })
        .times(1)
        .returning(|_, _| {
            Ok(vec![
                table(&[
                    &["Date", "Détail des opérations", "Débit", "Crédit"],
                    &["28/12", "CB CARREFOUR", "12,50", ""],
                    &["", "FACTURE 2712", "", ""],
                ]),
                table(&[
                    &["Date", "Détail des opérations", "Débit", "Crédit"],
                    &["03/01", "VIR SALAIRE", "", "1 234,00"],
                ]),
                table(&[
                    &["Date", "Détail des opérations", "Débit", "Crédit"],
                    &["05/01", "INTERETS", "", "3,21"],
                ]),
            ])
        });

    // WHEN: the document is processed.
    let processor = StatementProcessor::new(Layout::default(), cells);
    let records = processor.process(&two_account_document()?)?;

    // THEN: records are grouped by account, in row order, with December dated in the prior year.
    expect_that!(
        records,
        elements_are![
            eq(&record(
                "111",
                date(2022, 12, 28),
                "CB CARREFOUR\nFACTURE 2712",
                Decimal::new(-1250, 2)
            )),
            eq(&record(
                "111",
                date(2023, 1, 3),
                "VIR SALAIRE",
                Decimal::new(1234, 0)
            )),
            eq(&record("222", date(2023, 1, 5), "INTERETS", Decimal::new(321, 2))),
        ]
    );
    Ok(())
}

#[gtest]
fn test_process_document_without_tables() -> anyhow::Result<()> {
    let mut cells = MockCells::new();
    cells
        .expect_extract_cell_grids()
        .withf(|_, regions| regions.is_empty())
        .returning(|_, _| Ok(vec![]));
    let document = Document::new(
        Path::new("RELEVES_111_20230603.pdf"),
        vec![PageBuilder::new(0).phrase("Conditions générales", 40.0, 100.0).build()],
    )?;

    let processor = StatementProcessor::new(Layout::default(), cells);

    expect_that!(processor.process(&document)?, is_empty());
    Ok(())
}

#[gtest]
fn test_process_fails_on_date_row_without_amount() -> anyhow::Result<()> {
    let mut cells = MockCells::new();
    cells.expect_extract_cell_grids().returning(|_, _| {
        Ok(vec![
            table(&[&["28/12", "CB CARREFOUR", "", ""]]),
            table(&[]),
            table(&[]),
        ])
    });

    let processor = StatementProcessor::new(Layout::default(), cells);

    expect_that!(
        processor.process(&two_account_document()?),
        err(anyhow_downcasts_to::<MalformedInput, _>(eq(
            MalformedInput::NoAmount
        )))
    );
    Ok(())
}

#[gtest]
fn test_final_record_serialises_report_columns() -> anyhow::Result<()> {
    let json = serde_json::to_value(record(
        "111",
        date(2023, 6, 3),
        "CB",
        Decimal::new(-1250, 2),
    ))?;

    expect_that!(
        json,
        eq(&serde_json::json!({
            "Account": "111",
            "Date": "2023-06-03",
            "Description": "CB",
            "Value": "-12.50",
        }))
    );
    Ok(())
}
