//! CLI 인자 파싱 모듈
//!
//! clap을 사용한 명령줄 인자 정의 및 파싱을 담당합니다.

use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;

/// 출력 파일 모드
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq)]
pub enum WriteMode {
    /// 기존 파일이 있으면 덮어쓰기
    #[default]
    Overwrite,
    /// 기존 파일에 추가
    Append,
    /// 기존 파일이 있으면 에러
    Error,
}

impl std::fmt::Display for WriteMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WriteMode::Overwrite => write!(f, "Overwrite"),
            WriteMode::Append => write!(f, "Append"),
            WriteMode::Error => write!(f, "Error"),
        }
    }
}

/// rextract CLI 인자 구조체
#[derive(Parser, Debug)]
#[command(
    name = "rextract",
    author = "YourName <your@email.com>",
    version,
    about = "REGEX FIELD EXTRACTOR - 정규식 명명 캡처 그룹으로 텍스트 라인에서 필드를 추출해 JSONL로 병합하는 CLI 도구",
    long_about = r#"
REGEX FIELD EXTRACTOR
=====================

입력의 각 라인에 지정된 모든 정규식을 순서대로 적용하여
명명 캡처 그룹의 결과를 하나의 JSON 객체로 병합해 출력합니다.

특징:
  • 여러 정규식을 한 라인에 동시 적용 후 결과 병합
  • 같은 필드 이름이 여러 번 캡처되면 배열로 승격
  • --unique 플래그로 배열 내 중복 값 제거
  • -r 플래그 반복 및 JSON 정의 파일(-f) 동시 지원
  • 파일 또는 표준 입출력 스트림 처리
  • 상세한 처리 통계 (stderr 출력, 파이프 안전)

예제:
  rextract -r 'user=(?P<user>\w+)' -i access.log -o result.jsonl
  rextract -r 'level=(?P<level>\w+)' -r 'status=(?P<status>\d+)' < app.log
  rextract -f patterns.json --unique -i app.log
  cat app.log | rextract -r '(?P<ip>\d+\.\d+\.\d+\.\d+)' > out.jsonl
"#
)]
pub struct Args {
    /// 명명 캡처 그룹을 포함한 정규식 (여러 번 지정 가능, 지정 순서 유지)
    #[arg(short = 'r', long = "regex", action = ArgAction::Append)]
    pub regex: Vec<String>,

    /// 정규식 배열을 담은 JSON 정의 파일 경로 ({"patterns": [...]})
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// 입력 파일 경로 (기본값: 표준 입력)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// 출력 파일 경로 (기본값: 표준 출력)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// 출력 파일 모드 (출력이 파일인 경우에만 적용)
    #[arg(short, long, value_enum, default_value_t = WriteMode::Overwrite)]
    pub mode: WriteMode,

    /// 다중 값 필드의 배열 내 값 중복 제거
    #[arg(short, long)]
    pub unique: bool,

    /// 상세 출력 모드 (매칭 없는 라인도 stderr에 표시)
    #[arg(short, long)]
    pub verbose: bool,

    /// 헤더와 통계 출력 생략
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// 입력 경로를 표시용 문자열로 반환
    pub fn input_label(&self) -> String {
        match &self.input {
            Some(path) => format!("{:?}", path),
            None => "(stdin)".to_string(),
        }
    }

    /// 출력 경로를 표시용 문자열로 반환
    pub fn output_label(&self) -> String {
        match &self.output {
            Some(path) => format!("{:?}", path),
            None => "(stdout)".to_string(),
        }
    }
}
