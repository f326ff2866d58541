use super::{PipelineConfig, PipelineEngine};

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use tempfile::{tempdir, NamedTempFile};

use crate::models::{CardholderRecord, EnrichedTransactionRecord, FraudRiskLevel, TransactionCategory};
use crate::sink::{MemorySink, RecordSink, SinkError};
use crate::stages::CardholderIndex;

fn create_temporary_json(content: &str) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    write!(file, "{content}")?;

    Ok(file)
}

fn create_index(cardholders: &[(&str, i64)]) -> Arc<CardholderIndex> {
    let records = cardholders.iter().map(|(cardholder_id, reward_points)| {
        let mut attributes = BTreeMap::new();
        attributes.insert("tier".to_string(), Some("gold".to_string()));

        CardholderRecord {
            cardholder_id: cardholder_id.to_string(),
            reward_points: Some(*reward_points),
            attributes
        }
    });

    Arc::new(CardholderIndex::from_records(vec!["tier".to_string()], records))
}

fn transaction_json(transaction_id: &str, cardholder_id: &str, amount: &str, status: &str) -> String {
    format!(
        r#"{{"transaction_id": "{transaction_id}", "cardholder_id": "{cardholder_id}", "merchant_id": "M1",
            "merchant_name": "Acme", "merchant_location": "NYC", "transaction_amount": {amount},
            "transaction_status": "{status}", "transaction_timestamp": "2024-01-01T10:00:00Z",
            "fraud_flag": false, "risk_score": 0.1}}"#
    )
}

fn find_record<'a>(sink: &'a MemorySink, transaction_id: &str) -> Result<&'a EnrichedTransactionRecord> {
    sink.records().iter()
        .find(|record| record.transaction_id.as_deref() == Some(transaction_id))
        .ok_or_else(|| anyhow!("{transaction_id} missing from sink"))
}

struct FailingSink;

impl RecordSink for FailingSink {
    fn append(&mut self, _: &EnrichedTransactionRecord) -> Result<(), SinkError> {
        Err(SinkError::Io(std::io::Error::other("warehouse unavailable")))
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        Ok(())
    }
}

#[tokio::test]
async fn test_engine_processes_reference_scenario() -> Result<()> {
    let file = create_temporary_json(&transaction_json("T1", "C1", "150", "SUCCESS"))?;
    let engine = PipelineEngine::new(create_index(&[("C1", 20)]), PipelineConfig::default());
    let mut sink = MemorySink::new();

    let report = engine.run(file.path(), &mut sink).await?;

    assert_eq!(report.read, 1);
    assert_eq!(report.emitted, 1);
    assert_eq!(report.matched, 1);
    assert_eq!(sink.flushes(), 1);

    let record = sink.records().first().ok_or_else(|| anyhow!("T1 missing from sink"))?;

    assert_eq!(record.transaction_category, TransactionCategory::Medium);
    assert!(!record.high_risk);
    assert_eq!(record.merchant_info.as_deref(), Some("Acme-NYC"));
    assert_eq!(record.updated_reward_points, Some(35));
    assert_eq!(record.fraud_risk_level, FraudRiskLevel::Low);

    Ok(())
}

#[tokio::test]
async fn test_engine_drops_invalid_records_and_keeps_unmatched_ones() -> Result<()> {
    let content = [
        transaction_json("T1", "C1", "0", "SUCCESS"),
        transaction_json("T2", "C1", "-0.01", "SUCCESS"),
        transaction_json("T3", "C1", "10", "CANCELLED"),
        transaction_json("T4", "C404", "700", "PENDING"),
        transaction_json("T5", "", "10", "FAILED"),
    ].join("\n");

    let file = create_temporary_json(&content)?;
    let engine = PipelineEngine::new(create_index(&[("C1", 20)]), PipelineConfig::default().with_workers(2));
    let mut sink = MemorySink::new();

    let report = engine.run(file.path(), &mut sink).await?;

    assert_eq!(report.read, 5);
    assert_eq!(report.rejected, 3);
    assert_eq!(report.emitted, 2);
    assert_eq!(report.matched, 1);
    assert_eq!(report.unmatched, 1);

    let mut ids: Vec<_> = sink.records().iter().filter_map(|record| record.transaction_id.clone()).collect();
    ids.sort();

    assert_eq!(ids, ["T1", "T4"]);

    let unmatched = sink.records().iter()
        .find(|record| record.cardholder_id == "C404")
        .ok_or_else(|| anyhow!("T4 missing from sink"))?;

    assert!(unmatched.reward_points.is_none());
    assert!(unmatched.updated_reward_points.is_none());
    assert_eq!(unmatched.cardholder_attributes.get("tier"), Some(&None));
    assert_eq!(unmatched.fraud_risk_level, FraudRiskLevel::Critical);

    Ok(())
}

#[tokio::test]
async fn test_engine_emits_records_with_malformed_fields_as_nulls() -> Result<()> {
    let content = concat!(
        r#"{"transaction_id": "T1", "cardholder_id": "C1", "merchant_id": "M1", "transaction_amount": 150, "transaction_status": "SUCCESS", "risk_score": "n/a"}"#, "\n",
        r#"{"transaction_id": "T2", "cardholder_id": "C1", "merchant_id": "M1", "transaction_amount": 150, "transaction_status": "SUCCESS", "fraud_flag": "false"}"#, "\n",
        r#"{"transaction_id": "T3", "cardholder_id": "C1", "merchant_id": "M1", "transaction_amount": 150, "transaction_status": "SUCCESS", "merchant_name": 7, "merchant_location": "NYC"}"#, "\n",
        r#"{"transaction_id": "T4", "cardholder_id": "C1", "merchant_id": "M1", "transaction_amount": "abc", "transaction_status": "SUCCESS"}"#, "\n"
    );

    let file = create_temporary_json(content)?;
    let engine = PipelineEngine::new(create_index(&[("C1", 20)]), PipelineConfig::default());
    let mut sink = MemorySink::new();

    let report = engine.run(file.path(), &mut sink).await?;

    assert_eq!(report.read, 4);
    assert_eq!(report.rejected, 1);
    assert_eq!(report.emitted, 3);

    let first = find_record(&sink, "T1")?;

    assert!(first.risk_score.is_none());
    assert_eq!(first.fraud_risk_level, FraudRiskLevel::Low);
    assert_eq!(first.updated_reward_points, Some(35));

    assert!(find_record(&sink, "T2")?.fraud_flag.is_none());
    assert!(find_record(&sink, "T3")?.merchant_name.is_none());
    assert!(find_record(&sink, "T3")?.merchant_info.is_none());
    assert!(find_record(&sink, "T4").is_err());

    Ok(())
}

#[tokio::test]
async fn test_engine_output_cardinality_is_independent_of_parallelism() -> Result<()> {
    let content = (0..500)
        .map(|i| transaction_json(&format!("T{i}"), &format!("C{}", i % 7), &format!("{}.5", i * 3), "SUCCESS"))
        .collect::<Vec<_>>()
        .join("\n");

    let file = create_temporary_json(&content)?;
    let index = create_index(&[("C0", 0), ("C1", 10), ("C2", 20)]);

    let mut results = Vec::new();

    for workers in [1, 3, 8] {
        let config = PipelineConfig::default().with_workers(workers).with_backpressure(4);
        let engine = PipelineEngine::new(index.clone(), config);
        let mut sink = MemorySink::new();

        let report = engine.run(file.path(), &mut sink).await?;

        assert_eq!(report.emitted, 500);
        assert_eq!(report.matched + report.unmatched, 500);

        let mut rows: Vec<_> = sink.records().iter()
            .map(|record| (record.transaction_id.clone(), record.updated_reward_points, record.fraud_risk_level))
            .collect();
        rows.sort_by(|left, right| left.0.cmp(&right.0));

        results.push(rows);
    }

    assert_eq!(results[0], results[1]);
    assert_eq!(results[1], results[2]);

    Ok(())
}

#[tokio::test]
async fn test_engine_reads_every_file_of_a_directory() -> Result<()> {
    let directory = tempdir()?;
    fs::write(directory.path().join("transactions_1.json"), format!("[{}]", transaction_json("T1", "C1", "10", "SUCCESS")))?;
    fs::write(directory.path().join("transactions_2.json"), transaction_json("T2", "C1", "20", "SUCCESS"))?;

    let engine = PipelineEngine::new(create_index(&[("C1", 20)]), PipelineConfig::default());
    let mut sink = MemorySink::new();

    let report = engine.run(directory.path(), &mut sink).await?;

    assert_eq!(report.read, 2);
    assert_eq!(sink.records().len(), 2);

    Ok(())
}

#[tokio::test]
async fn test_engine_fails_for_missing_transaction_source() -> Result<()> {
    let engine = PipelineEngine::new(create_index(&[]), PipelineConfig::default());
    let mut sink = MemorySink::new();

    assert!(engine.run(Path::new("missing.json"), &mut sink).await.is_err());
    assert!(sink.records().is_empty());

    Ok(())
}

#[tokio::test]
async fn test_engine_fails_for_malformed_transaction_source() -> Result<()> {
    let file = create_temporary_json("{\"transaction_id\": \"T1\"")?;
    let engine = PipelineEngine::new(create_index(&[]), PipelineConfig::default());
    let mut sink = MemorySink::new();

    assert!(engine.run(file.path(), &mut sink).await.is_err());

    Ok(())
}

#[tokio::test]
async fn test_engine_surfaces_sink_failures() -> Result<()> {
    let file = create_temporary_json(&transaction_json("T1", "C1", "10", "SUCCESS"))?;
    let engine = PipelineEngine::new(create_index(&[("C1", 20)]), PipelineConfig::default());

    assert!(engine.run(file.path(), &mut FailingSink).await.is_err());

    Ok(())
}

#[test]
fn test_config_defaults_and_lower_bounds() {
    let config = PipelineConfig::default();

    assert_eq!(config.workers, 4);
    assert_eq!(config.backpressure, 256);

    let config = config.with_workers(0).with_backpressure(0);

    assert_eq!(config.workers, 1);
    assert_eq!(config.backpressure, 1);
}
