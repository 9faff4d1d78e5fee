use crate::config::{AppConfig, OutputFormat};
use crate::errors::AppResult;
use crate::parser::RedeemScriptParserFactory;
use crate::script::{to_asm, tokenize_bounded};
use crate::types::ClassificationReport;
use clap::Args;
use tracing::info;

/// Classify a single hex-encoded redeem script or P2SH spending script
#[derive(Args)]
pub struct ClassifyCommand {
    /// Script bytes as hex (an optional 0x prefix is ignored)
    pub script_hex: String,

    /// Output format (overrides config.toml)
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,
}

impl ClassifyCommand {
    pub fn run(&self, config: &AppConfig) -> AppResult<()> {
        let report = self.classify(config)?;

        match self.format.unwrap_or(config.output.format) {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
            OutputFormat::Text => print_report_text(&report),
        }

        Ok(())
    }

    /// Decode, tokenize and classify the script
    ///
    /// Bad hex or bytes that do not tokenize are errors here; a script that
    /// tokenizes but matches nothing is a normal, unrecognised report.
    pub fn classify(&self, config: &AppConfig) -> AppResult<ClassificationReport> {
        let bytes = decode_script_hex(&self.script_hex)?;
        let chunks = tokenize_bounded(&bytes, config.classifier.max_script_size)?;
        info!("Classifying {} bytes: {}", bytes.len(), to_asm(&chunks));

        let factory = RedeemScriptParserFactory::new(&config.classifier);
        let parser = factory.get(&chunks);
        Ok(ClassificationReport::from(&parser))
    }
}

/// Decode script hex, tolerating surrounding whitespace and a 0x prefix
pub fn decode_script_hex(input: &str) -> AppResult<Vec<u8>> {
    let trimmed = input.trim();
    let hex_str = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    Ok(hex::decode(hex_str)?)
}

fn print_report_text(report: &ClassificationReport) {
    println!("\n=== Redeem Script Classification ===");
    println!("Multisig type: {}", report.multisig_type);
    println!("Script type:   {}", report.script_type);

    if !report.is_recognized() {
        println!();
        return;
    }

    if let Some(hash) = &report.derivation_hash {
        println!();
        println!("Derivation hash:");
        println!("  {}", hash);
    }

    println!();
    println!(
        "Default signers: {}-of-{}",
        report.threshold.unwrap_or_default(),
        report.pub_keys.len()
    );
    for (index, key) in report.pub_keys.iter().enumerate() {
        println!("  [{}] {}", index, key);
    }

    if let Some(erp_threshold) = report.erp_threshold {
        println!();
        println!(
            "Emergency signers: {}-of-{} after {} (CSV)",
            erp_threshold,
            report.erp_pub_keys.len(),
            report.csv_value.unwrap_or_default()
        );
        for (index, key) in report.erp_pub_keys.iter().enumerate() {
            println!("  [{}] {}", index, key);
        }
    }

    if let Some(standard) = &report.standard_redeem_script {
        println!();
        println!("Standard redeem script:");
        println!("  {}", standard);
    }
    println!();
}
