use crate::core::extract::{self, ExtractSummary};
use crate::error::Result;
use std::path::Path;

pub fn unzip_archive(source: &Path, destination: &Path) -> Result<()> {
    println!("Extracting {} to {}", source.display(), destination.display());

    let summary = extract::unzip(source, destination)?;
    print_summary(&summary);

    Ok(())
}

pub(crate) fn print_summary(summary: &ExtractSummary) {
    for line in summary_lines(summary) {
        println!("{line}");
    }
}

fn summary_lines(summary: &ExtractSummary) -> Vec<String> {
    let mut lines = Vec::new();

    if !summary.extracted.is_empty() {
        lines.push(format!(
            "✅ Extracted {} entries ({} already present)",
            summary.extracted.len(),
            summary.skipped.len()
        ));
    } else if !summary.skipped.is_empty() {
        lines.push(format!(
            "Nothing to extract, {} entries already present",
            summary.skipped.len()
        ));
    } else {
        lines.push("Nothing extracted: the archive has no usable entries".to_string());
    }

    for name in &summary.rejected {
        lines.push(format!("⚠️  Skipped unsafe entry: {name}"));
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    #[test]
    fn test_summary_for_partial_extraction() {
        let summary = ExtractSummary {
            extracted: vec![PathBuf::from("out/a.txt")],
            skipped: vec![PathBuf::from("out/sub/b.txt")],
            rejected: Vec::new(),
        };
        assert_eq!(
            summary_lines(&summary),
            vec!["✅ Extracted 1 entries (1 already present)".to_string()]
        );
    }

    #[test]
    fn test_summary_when_everything_present() {
        let summary = ExtractSummary {
            skipped: vec![PathBuf::from("out/a.txt"), PathBuf::from("out/b.txt")],
            ..ExtractSummary::default()
        };
        assert_eq!(
            summary_lines(&summary),
            vec!["Nothing to extract, 2 entries already present".to_string()]
        );
    }

    #[test]
    fn test_summary_for_empty_archive() {
        assert_eq!(
            summary_lines(&ExtractSummary::default()),
            vec!["Nothing extracted: the archive has no usable entries".to_string()]
        );
    }

    #[test]
    fn test_summary_when_only_rejected_entries() {
        let summary = ExtractSummary {
            rejected: vec!["../evil.txt".to_string()],
            ..ExtractSummary::default()
        };
        assert_eq!(
            summary_lines(&summary),
            vec![
                "Nothing extracted: the archive has no usable entries".to_string(),
                "⚠️  Skipped unsafe entry: ../evil.txt".to_string(),
            ]
        );
    }
}
