// PDF report via pandoc.
//
// The Markdown report is rendered to a temp file and handed to pandoc,
// trying each LaTeX engine in turn. If pandoc is missing or every engine
// fails, the Markdown report is written instead so the run still produces
// something readable.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::process::Command;
use tracing::{info, warn};

use super::{markdown, Report, ReportFormat, WrittenReport};

/// PDF engines tried in order.
pub const PDF_ENGINES: &[&str] = &["xelatex", "pdflatex", "lualatex"];

/// Per-engine time limit.
const ENGINE_TIMEOUT: Duration = Duration::from_secs(30);

/// Write `<base>.pdf`, or `<base>.md` when PDF conversion is unavailable.
pub async fn write(report: &Report<'_>, base: &Path, pandoc: &str) -> Result<WrittenReport> {
    let temp_base = temp_base(base);
    let temp_md = markdown::write(report, &temp_base)?;
    let pdf_path = super::with_extension(base, "pdf");

    let converted = if pandoc_available(pandoc).await {
        convert(pandoc, &temp_md, &pdf_path, report).await
    } else {
        warn!(pandoc, "pandoc not found; install it to produce PDF reports");
        false
    };

    if let Err(e) = tokio::fs::remove_file(&temp_md).await {
        warn!(path = %temp_md.display(), error = %e, "Failed to remove temporary Markdown");
    }

    if converted {
        info!(path = %pdf_path.display(), "PDF report generated");
        return Ok(WrittenReport {
            path: pdf_path,
            format: ReportFormat::Pdf,
        });
    }

    let path = markdown::write(report, base)?;
    warn!(path = %path.display(), "PDF generation failed, wrote Markdown instead");
    Ok(WrittenReport {
        path,
        format: ReportFormat::Md,
    })
}

/// Arguments passed to pandoc for one engine attempt.
pub fn pandoc_args(input: &Path, output: &Path, engine: &str, date: &str) -> Vec<String> {
    vec![
        input.display().to_string(),
        "-o".to_string(),
        output.display().to_string(),
        format!("--pdf-engine={engine}"),
        "-V".to_string(),
        "geometry:margin=1in".to_string(),
        "-V".to_string(),
        "fontsize=11pt".to_string(),
        "-V".to_string(),
        "linestretch=1.2".to_string(),
        "--metadata".to_string(),
        "title=Source Code Similarity Report".to_string(),
        "--metadata".to_string(),
        format!("date={date}"),
        "--metadata".to_string(),
        "keywords=similarity,source code,cosine,jaccard,levenshtein".to_string(),
        "--table-of-contents".to_string(),
        "--toc-depth=2".to_string(),
    ]
}

fn temp_base(base: &Path) -> PathBuf {
    let mut name = base.as_os_str().to_owned();
    name.push("_temp");
    PathBuf::from(name)
}

async fn pandoc_available(pandoc: &str) -> bool {
    Command::new(pandoc)
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Try each engine until one succeeds.
async fn convert(pandoc: &str, input: &Path, output: &Path, report: &Report<'_>) -> bool {
    let date = report.generated_at.format("%Y-%m-%d").to_string();

    for engine in PDF_ENGINES {
        match run_engine(pandoc, input, output, engine, &date).await {
            Ok(()) => return true,
            Err(e) => warn!(engine, error = %e, "PDF engine failed, trying next"),
        }
    }
    false
}

async fn run_engine(
    pandoc: &str,
    input: &Path,
    output: &Path,
    engine: &str,
    date: &str,
) -> Result<()> {
    let mut command = Command::new(pandoc);
    command
        .args(pandoc_args(input, output, engine, date))
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let result = tokio::time::timeout(ENGINE_TIMEOUT, command.output())
        .await
        .map_err(|_| anyhow::anyhow!("timed out after {}s", ENGINE_TIMEOUT.as_secs()))?
        .with_context(|| format!("Failed to run {pandoc}"))?;

    if !result.status.success() {
        let stderr = String::from_utf8_lossy(&result.stderr);
        anyhow::bail!("{}: {}", result.status, stderr.trim());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pandoc_args() {
        let args = pandoc_args(Path::new("in.md"), Path::new("out.pdf"), "xelatex", "2025-01-02");
        assert_eq!(args[0], "in.md");
        assert_eq!(args[1], "-o");
        assert_eq!(args[2], "out.pdf");
        assert!(args.contains(&"--pdf-engine=xelatex".to_string()));
        assert!(args.contains(&"date=2025-01-02".to_string()));
    }

    #[test]
    fn test_temp_base() {
        assert_eq!(
            temp_base(Path::new("out/report")),
            PathBuf::from("out/report_temp")
        );
    }
}
