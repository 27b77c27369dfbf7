use anyhow::Result;
use colored::*;
use serde::Serialize;
use std::fmt::Write as _;
use std::path::Path;

use crate::classify::{classify, Category, PropertyAccess, ValueType};
use crate::cli::OutputFormat;
use crate::snapshot::{ModuleSnapshot, RuntimeValue};
use crate::stub::minimal_bases;

#[derive(Debug, Clone, Serialize)]
pub struct InspectReport {
    pub module: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    pub native: bool,
    pub symbols: Vec<SymbolReport>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SymbolReport {
    pub name: String,
    #[serde(flatten)]
    pub category: Category,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub bases: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<MemberReport>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MemberReport {
    pub name: String,
    #[serde(flatten)]
    pub category: Category,
}

fn symbol_report(name: &str, value: &RuntimeValue) -> SymbolReport {
    let category = classify(value);
    let (bases, members) = match (&category, &value.type_info) {
        (Category::Type, Some(info)) => (
            minimal_bases(info)
                .into_iter()
                .map(|ancestor| ancestor.qualified_name())
                .collect(),
            info.members
                .iter()
                .map(|(name, member)| MemberReport {
                    name: name.clone(),
                    category: classify(member),
                })
                .collect(),
        ),
        _ => (Vec::new(), Vec::new()),
    };

    SymbolReport {
        name: name.to_string(),
        category,
        bases,
        members,
    }
}

/// Classify every top-level symbol and, for types, every member.
pub fn inspect_snapshot(snapshot: &ModuleSnapshot) -> InspectReport {
    InspectReport {
        module: snapshot.name.clone(),
        file: snapshot.file.clone(),
        native: snapshot.is_native(),
        symbols: snapshot
            .members
            .iter()
            .map(|(name, value)| symbol_report(name, value))
            .collect(),
    }
}

fn describe(category: &Category) -> String {
    match category {
        Category::Property { access } => match access {
            PropertyAccess::ReadOnly => "property (read-only)".to_string(),
            PropertyAccess::ReadWrite => "property (read-write)".to_string(),
        },
        Category::Value { value_type } => match value_type {
            ValueType::Builtin(name) => format!("value ({name})"),
            ValueType::Any => "value (Any)".to_string(),
            ValueType::Module => "module".to_string(),
        },
        other => other.label().to_string(),
    }
}

fn colorize(category: &Category, text: String) -> ColoredString {
    match category {
        Category::Function | Category::ClassMethod => text.green(),
        Category::Method => text.cyan(),
        Category::Property { .. } => text.yellow(),
        Category::Type => text.blue().bold(),
        Category::Value { .. } => text.normal(),
    }
}

/// Terminal table of the report.
pub fn format_terminal(report: &InspectReport) -> String {
    let mut out = String::new();
    let kind = if report.native {
        "native".green()
    } else {
        "source".red()
    };
    let _ = writeln!(out, "{} {} ({})", "Module".bold(), report.module.bold(), kind);
    if let Some(file) = &report.file {
        let _ = writeln!(out, "  file: {}", file.dimmed());
    }

    let width = report
        .symbols
        .iter()
        .flat_map(|s| std::iter::once(s.name.len()).chain(s.members.iter().map(|m| m.name.len() + 2)))
        .max()
        .unwrap_or(0);

    for symbol in &report.symbols {
        let label = colorize(&symbol.category, describe(&symbol.category));
        let _ = writeln!(out, "  {:<width$}  {}", symbol.name, label);
        if !symbol.bases.is_empty() {
            let _ = writeln!(
                out,
                "  {:<width$}  {} {}",
                "",
                "bases:".dimmed(),
                symbol.bases.join(", ")
            );
        }
        for member in &symbol.members {
            let name = format!(".{}", member.name);
            let label = colorize(&member.category, describe(&member.category));
            let _ = writeln!(out, "    {:<w$}  {}", name, label, w = width.saturating_sub(2));
        }
    }
    out
}

pub fn handle_inspect(snapshot_path: &Path, format: OutputFormat) -> Result<()> {
    let snapshot = ModuleSnapshot::load(snapshot_path)?;
    let report = inspect_snapshot(&snapshot);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Terminal => print!("{}", format_terminal(&report)),
    }
    Ok(())
}
