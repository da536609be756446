//! 라인 처리 모듈
//!
//! 입력 스트림을 한 라인씩 읽어 병합 알고리즘을 적용하고
//! JSONL로 출력하는 구동 루프를 담당합니다.

use colored::Colorize;
use std::io::{BufRead, Write};

use crate::error::{Result, RextractError};
use crate::merger::merge_line;
use crate::pattern::PatternSet;
use crate::stats::Statistics;

/// 라인 처리 옵션
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessOptions {
    /// 다중 값 필드의 중복 제거 여부
    pub unique: bool,
    /// 건너뛴 라인을 stderr에 표시
    pub verbose: bool,
}

impl ProcessOptions {
    /// 기본 옵션 생성
    pub fn new() -> Self {
        Self::default()
    }

    /// 중복 제거 옵션 설정
    pub fn with_unique(mut self, unique: bool) -> Self {
        self.unique = unique;
        self
    }

    /// 상세 출력 설정
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

/// 입력을 한 라인씩 읽어 모든 패턴을 적용하고 병합 결과를 JSONL로 출력
///
/// 단일 스레드 동기 루프입니다. 라인 간 공유 상태가 없으므로 각 라인의
/// 레코드는 독립적으로 만들어지고 직렬화 직후 버려집니다.
///
/// 에러 처리:
/// - 입력 읽기 실패 → 치명적, 즉시 중단
/// - 레코드 직렬화 실패 → 해당 라인만 경고 후 건너뜀 (비치명적)
/// - 출력 쓰기 실패 → 치명적 (출력 싱크가 깨진 것으로 간주)
///
/// # Arguments
/// * `reader` - 라인 단위 입력 소스
/// * `writer` - JSONL 출력 싱크
/// * `patterns` - 컴파일된 패턴 집합
/// * `options` - 처리 옵션
/// * `stats` - 처리 통계 수집기
pub fn process_lines<R: BufRead, W: Write>(
    reader: R,
    mut writer: W,
    patterns: &PatternSet,
    options: &ProcessOptions,
    stats: &Statistics,
) -> Result<()> {
    for line_result in reader.lines() {
        let line = line_result.map_err(|e| RextractError::ReadError {
            reason: e.to_string(),
        })?;

        stats.increment_total();
        stats.add_bytes_read(line.len() as u64 + 1);

        let record = merge_line(patterns, &line, options.unique);

        if record.is_empty() {
            stats.increment_skipped();
            if options.verbose {
                eprintln!("  {} 매칭 없음: {}", "⏭️".yellow(), line.dimmed());
            }
            continue;
        }

        let json_line = match record.to_json_line() {
            Ok(json_line) => json_line,
            Err(e) => {
                stats.increment_warning();
                eprintln!(
                    "{} 라인 직렬화 실패, 건너뜀: {} ({})",
                    "⚠️".bright_yellow(),
                    line.dimmed(),
                    e.to_string().yellow()
                );
                continue;
            }
        };

        writeln!(writer, "{}", json_line).map_err(|e| RextractError::WriteError {
            reason: e.to_string(),
        })?;

        stats.increment_emitted();
        stats.add_bytes_written(json_line.len() as u64 + 1);
    }

    writer.flush().map_err(|e| RextractError::WriteError {
        reason: e.to_string(),
    })?;

    Ok(())
}
