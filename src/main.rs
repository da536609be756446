//! rextract - REGEX FIELD EXTRACTOR
//!
//! 메인 엔트리포인트

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::time::Duration;

use rextract::{
    cli::{Args, WriteMode},
    config::DefinitionFile,
    error::RextractError,
    pattern::PatternSet,
    processor::{process_lines, ProcessOptions},
    stats::Statistics,
};

fn main() -> Result<()> {
    let args = Args::parse();

    // 패턴 수집 (CLI -r 순서 먼저, 그 뒤 정의 파일 배열 순서)
    let raw_patterns = collect_patterns(&args)?;

    if raw_patterns.is_empty() {
        eprintln!(
            "{} {}",
            "❌".bright_red(),
            RextractError::NoPatterns.to_string().red()
        );
        eprintln!("   {}", "자세한 사용법: rextract --help".dimmed());
        std::process::exit(1);
    }

    // 패턴 컴파일 및 검증
    let patterns =
        PatternSet::compile(&raw_patterns).map_err(|e| anyhow::anyhow!("{}", e))?;

    // 헤더 출력
    if !args.quiet {
        print_header(&args, patterns.len());
    }

    // 입출력 설정
    let reader = open_reader(&args)?;
    let writer = open_writer(&args)?;

    // 통계 초기화
    let stats = Statistics::new();

    let options = ProcessOptions::new()
        .with_unique(args.unique)
        .with_verbose(args.verbose);

    // 스피너 (stderr가 터미널이 아니면 자동 숨김)
    let spinner = create_spinner(args.quiet);

    // 라인 처리
    let result = process_lines(reader, writer, &patterns, &options, &stats);

    spinner.finish_and_clear();

    result.map_err(|e| anyhow::anyhow!("{}", e))?;

    // 통계 출력
    if !args.quiet {
        stats.print_summary();
        eprintln!(
            "\n{} 처리 완료: {}\n",
            "✅".bright_green(),
            args.output_label()
        );
    }

    Ok(())
}

/// CLI 플래그와 정의 파일에서 패턴 문자열 수집
///
/// -r 플래그로 지정된 패턴이 먼저, 정의 파일의 patterns 배열이 그 뒤를
/// 따릅니다. 이 순서가 병합 시 어느 패턴이 먼저 적용되는지를 결정합니다.
fn collect_patterns(args: &Args) -> Result<Vec<String>> {
    let mut patterns = args.regex.clone();

    if let Some(ref config_path) = args.file {
        let defs = DefinitionFile::load(config_path)
            .with_context(|| format!("정의 파일 로드 실패: {:?}", config_path))?;
        patterns.extend(defs.patterns);
    }

    Ok(patterns)
}

/// 헤더 출력 (stderr)
fn print_header(args: &Args, pattern_count: usize) {
    eprintln!("\n{}", "═".repeat(50).bright_blue());
    eprintln!("{}", " 🔍 REGEX FIELD EXTRACTOR".bright_white().bold());
    eprintln!("{}", "═".repeat(50).bright_blue());
    eprintln!("  {} 입력: {}", "📥".bright_cyan(), args.input_label());
    eprintln!("  {} 출력: {}", "📤".bright_green(), args.output_label());
    eprintln!(
        "  {} 패턴 수: {}",
        "📋".bright_magenta(),
        pattern_count.to_string().bright_green()
    );

    if args.output.is_some() {
        eprintln!("  {} 모드: {}", "⚙️".bright_yellow(), args.mode);
    }

    if args.unique {
        eprintln!("  {} {}", "🧹".bright_cyan(), "중복 값 제거 모드".cyan());
    }

    eprintln!("{}", "═".repeat(50).bright_blue());
}

/// 입력 소스 열기 (파일 또는 표준 입력)
fn open_reader(args: &Args) -> Result<Box<dyn BufRead>> {
    match &args.input {
        Some(path) => {
            let file = File::open(path).map_err(|e| RextractError::InputOpenError {
                file: path.clone(),
                reason: e.to_string(),
            })?;
            Ok(Box::new(BufReader::new(file)))
        }
        None => Ok(Box::new(BufReader::new(io::stdin()))),
    }
}

/// 출력 싱크 열기 (파일 또는 표준 출력)
fn open_writer(args: &Args) -> Result<Box<dyn Write>> {
    match &args.output {
        Some(path) => {
            check_output_mode(args.mode, path)?;
            let file = open_output_file(args.mode, path)?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(BufWriter::new(io::stdout()))),
    }
}

/// 출력 모드 확인
fn check_output_mode(mode: WriteMode, path: &Path) -> Result<()> {
    if mode == WriteMode::Error && path.exists() {
        return Err(RextractError::OutputExists {
            path: path.to_path_buf(),
        }
        .into());
    }
    Ok(())
}

/// 출력 파일 열기
fn open_output_file(mode: WriteMode, path: &Path) -> Result<File> {
    let file = match mode {
        WriteMode::Append => OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| RextractError::OutputCreateError {
                file: path.to_path_buf(),
                reason: e.to_string(),
            })?,
        _ => File::create(path).map_err(|e| RextractError::OutputCreateError {
            file: path.to_path_buf(),
            reason: e.to_string(),
        })?,
    };
    Ok(file)
}

/// 스피너 생성 (quiet 모드에서는 숨김)
fn create_spinner(quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    spinner.set_message("라인 처리 중...");
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}
