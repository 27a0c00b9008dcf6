//! Command-line client that runs the triage engine in-process.
//!
//! Usage:
//!   cargo run --bin triage -- analyze --age 30 --gender male --duration 1_3_days --severity mild "runny nose and sore throat"
//!   cargo run --bin triage -- emergency "severe chest pain"
//!   cargo run --bin triage -- symptoms
//!   cargo run --bin triage -- search cold
//!   cargo run --bin triage -- tips --condition Migraine

use anyhow::Result;
use clap::{Parser, Subcommand};
use prettytable::{Table, row};
use serde::Serialize;
use serde_json::json;
use symptom_triage::{
    SymptomChecker, TriageError,
    engine::types::{AnalysisResult, ConditionHit, EmergencyAssessment},
    validation,
};

#[derive(Parser)]
#[command(name = "triage")]
#[command(about = "Rule-based symptom triage", long_about = None)]
struct Cli {
    /// Print the serialized result instead of tables
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a free-text symptom description
    Analyze {
        #[arg(long)]
        age: String,
        #[arg(long)]
        gender: String,
        #[arg(long)]
        duration: String,
        #[arg(long)]
        severity: String,
        /// Symptom description
        symptoms: String,
    },
    /// Check text for emergency warning signs only
    Emergency { symptoms: String },
    /// List every known symptom phrase
    Symptoms,
    /// Search condition names
    Search { query: String },
    /// General health tips, optionally for one condition
    Tips {
        #[arg(long)]
        condition: Option<String>,
    },
}

fn main() -> Result<()> {
    symptom_triage::load_env();
    symptom_triage::init_tracing("symptom_triage=warn");

    let cli = Cli::parse();
    let checker = SymptomChecker::new();

    match cli.command {
        Commands::Analyze {
            age,
            gender,
            duration,
            severity,
            symptoms,
        } => {
            let payload = json!({
                "age": age,
                "gender": gender,
                "symptoms": symptoms,
                "duration": duration,
                "severity": severity,
            });
            let data = payload.as_object().cloned().unwrap_or_default();
            let request = match validation::validate_analysis(&data) {
                Ok(request) => request,
                Err(e) => {
                    report_invalid(&e);
                    std::process::exit(2);
                }
            };
            let result = checker.analyze(&request)?;
            if cli.json {
                print_json(&result)
            } else {
                print_analysis(&result);
                Ok(())
            }
        }
        Commands::Emergency { symptoms } => {
            let assessment = checker.check_emergency(&symptoms);
            if cli.json {
                print_json(&assessment)
            } else {
                print_emergency(&assessment);
                Ok(())
            }
        }
        Commands::Symptoms => {
            let symptoms = checker.list_common_symptoms();
            if cli.json {
                return print_json(&json!({ "common_symptoms": symptoms, "count": symptoms.len() }));
            }
            let mut table = Table::new();
            table.add_row(row!["Symptom"]);
            for s in &symptoms {
                table.add_row(row![s]);
            }
            table.printstd();
            println!("{} symptoms", symptoms.len());
            Ok(())
        }
        Commands::Search { query } => {
            let query = match validation::validate_query(Some(&query)) {
                Ok(q) => q,
                Err(e) => {
                    report_invalid(&e);
                    std::process::exit(2);
                }
            };
            let results = checker.search_conditions(&query);
            if cli.json {
                return print_json(&json!({ "query": query, "results": results, "count": results.len() }));
            }
            print_search(&query, &results);
            Ok(())
        }
        Commands::Tips { condition } => {
            let tips = checker.health_tips(condition.as_deref());
            if cli.json {
                return print_json(&json!({ "condition": condition, "tips": tips, "count": tips.len() }));
            }
            for (i, tip) in tips.iter().enumerate() {
                println!("{:>2}. {}", i + 1, tip);
            }
            Ok(())
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn report_invalid(err: &TriageError) {
    match err {
        TriageError::Validation { errors } => {
            eprintln!("❌ Validation failed:");
            for e in errors {
                eprintln!("  - {}", e);
            }
        }
        TriageError::InvalidQuery { message } => eprintln!("❌ {}", message),
        other => eprintln!("❌ {}", other),
    }
}

fn print_list(title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    println!("\n{}:", title);
    for item in items {
        println!("  • {}", item);
    }
}

fn print_analysis(result: &AnalysisResult) {
    println!("{}", result.summary);

    let mut table = Table::new();
    table.add_row(row!["Risk", "Confidence", "Urgency", "Phrases"]);
    table.add_row(row![
        result.risk_assessment,
        result.confidence_level,
        result.emergency_check.urgency_level,
        result.symptom_profile.symptom_count,
    ]);
    table.printstd();

    print_list("Possible conditions", &result.possible_conditions);
    print_list("Emergency warnings", &result.emergency_warnings);
    print_list("Recommended actions", &result.recommended_actions);
    print_list("Self-care", &result.self_care_tips);
    print_list("When to seek care", &result.when_to_seek_care);
    print_list("Follow up", &result.follow_up_recommendations);
}

fn print_emergency(assessment: &EmergencyAssessment) {
    let mut table = Table::new();
    table.add_row(row!["Emergency", "Urgency"]);
    table.add_row(row![assessment.is_emergency, assessment.urgency_level]);
    table.printstd();
    print_list("Warning signs", &assessment.warning_signs);
    println!("\n{}", assessment.recommendation);
}

fn print_search(query: &str, results: &[ConditionHit]) {
    if results.is_empty() {
        println!("No conditions match '{}'.", query);
        return;
    }
    let mut table = Table::new();
    table.add_row(row!["Condition", "Source", "Symptoms"]);
    for hit in results {
        let (source, symptoms) = match hit {
            ConditionHit::Profile { severity, symptoms, .. } => {
                (format!("profile ({severity})"), symptoms)
            }
            ConditionHit::Category { category, symptoms, .. } => {
                (format!("category: {category}"), symptoms)
            }
        };
        table.add_row(row![hit.name(), source, symptoms.join(", ")]);
    }
    table.printstd();
}
