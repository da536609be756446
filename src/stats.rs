//! 통계 및 유틸리티 모듈
//!
//! 라인 처리 통계 수집 및 포맷팅을 담당합니다.
//! stdout은 JSONL 데이터 전용이므로 모든 통계 출력은 stderr로 나갑니다.

use colored::Colorize;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

/// 처리 통계 구조체
#[derive(Debug, Default)]
pub struct Statistics {
    /// 읽은 총 라인 수
    pub total_lines: AtomicUsize,
    /// JSON 객체를 출력한 라인 수
    pub emitted_lines: AtomicUsize,
    /// 매칭 없이 건너뛴 라인 수
    pub skipped_lines: AtomicUsize,
    /// 직렬화 경고 수
    pub warning_count: AtomicUsize,
    /// 읽은 총 바이트
    pub total_bytes_read: AtomicU64,
    /// 쓴 총 바이트
    pub total_bytes_written: AtomicU64,
    /// 처리 시작 시간
    start_time: Option<Instant>,
}

impl Statistics {
    /// 새 통계 인스턴스 생성
    pub fn new() -> Self {
        Self {
            start_time: Some(Instant::now()),
            ..Default::default()
        }
    }

    /// 읽은 라인 카운트 증가
    pub fn increment_total(&self) {
        self.total_lines.fetch_add(1, Ordering::Relaxed);
    }

    /// 출력 라인 카운트 증가
    pub fn increment_emitted(&self) {
        self.emitted_lines.fetch_add(1, Ordering::Relaxed);
    }

    /// 건너뛴 라인 카운트 증가
    pub fn increment_skipped(&self) {
        self.skipped_lines.fetch_add(1, Ordering::Relaxed);
    }

    /// 경고 카운트 증가
    pub fn increment_warning(&self) {
        self.warning_count.fetch_add(1, Ordering::Relaxed);
    }

    /// 읽은 바이트 추가
    pub fn add_bytes_read(&self, bytes: u64) {
        self.total_bytes_read.fetch_add(bytes, Ordering::Relaxed);
    }

    /// 쓴 바이트 추가
    pub fn add_bytes_written(&self, bytes: u64) {
        self.total_bytes_written.fetch_add(bytes, Ordering::Relaxed);
    }

    /// 읽은 라인 수 반환
    pub fn get_total_lines(&self) -> usize {
        self.total_lines.load(Ordering::Relaxed)
    }

    /// 출력 라인 수 반환
    pub fn get_emitted_lines(&self) -> usize {
        self.emitted_lines.load(Ordering::Relaxed)
    }

    /// 건너뛴 라인 수 반환
    pub fn get_skipped_lines(&self) -> usize {
        self.skipped_lines.load(Ordering::Relaxed)
    }

    /// 경고 수 반환
    pub fn get_warning_count(&self) -> usize {
        self.warning_count.load(Ordering::Relaxed)
    }

    /// 경과 시간 반환
    pub fn elapsed(&self) -> Duration {
        self.start_time
            .map(|t| t.elapsed())
            .unwrap_or(Duration::ZERO)
    }

    /// 처리 통계 요약을 stderr에 출력
    pub fn print_summary(&self) {
        let total = self.get_total_lines();
        let emitted = self.get_emitted_lines();
        let skipped = self.get_skipped_lines();
        let warnings = self.get_warning_count();
        let bytes_read = self.total_bytes_read.load(Ordering::Relaxed);
        let bytes_written = self.total_bytes_written.load(Ordering::Relaxed);
        let elapsed = self.elapsed();

        eprintln!("\n{}", "═".repeat(50).bright_blue());
        eprintln!("{}", " 📊 처리 통계".bright_white().bold());
        eprintln!("{}", "═".repeat(50).bright_blue());

        eprintln!("  {} 전체 라인:    {}", "📄".bright_cyan(), total);
        eprintln!(
            "  {} 출력:         {}",
            "✅".bright_green(),
            emitted.to_string().green()
        );
        eprintln!("  {} 미매칭:       {}", "⏭️".bright_yellow(), skipped);

        if warnings > 0 {
            eprintln!(
                "  {} 경고:         {}",
                "⚠️".bright_yellow(),
                warnings.to_string().yellow()
            );
        }

        eprintln!(
            "  {} 입력 용량:    {}",
            "📥".bright_yellow(),
            format_bytes(bytes_read)
        );
        eprintln!(
            "  {} 출력 용량:    {}",
            "📤".bright_magenta(),
            format_bytes(bytes_written)
        );

        if total > 0 {
            let match_rate = (emitted as f64 / total as f64) * 100.0;
            eprintln!("  {} 매칭률:       {:.1}%", "📈".bright_white(), match_rate);
        }

        eprintln!(
            "  {} 처리 시간:    {}",
            "⏱️".bright_cyan(),
            format_duration(elapsed)
        );

        eprintln!("{}", "═".repeat(50).bright_blue());
    }
}

/// 바이트를 읽기 쉬운 형식으로 변환
///
/// # Examples
/// ```
/// use rextract::stats::format_bytes;
///
/// assert_eq!(format_bytes(500), "500 B");
/// assert_eq!(format_bytes(1024), "1.00 KB");
/// assert_eq!(format_bytes(1048576), "1.00 MB");
/// ```
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// 경과 시간을 읽기 쉬운 형식으로 변환
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    let millis = duration.subsec_millis();

    if secs >= 3600 {
        let hours = secs / 3600;
        let mins = (secs % 3600) / 60;
        format!("{}시간 {}분", hours, mins)
    } else if secs >= 60 {
        let mins = secs / 60;
        let remaining_secs = secs % 60;
        format!("{}분 {}초", mins, remaining_secs)
    } else if secs > 0 {
        format!("{}.{:03}초", secs, millis)
    } else {
        format!("{}ms", millis)
    }
}
