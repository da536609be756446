//! 에러 타입 정의 모듈
//!
//! rextract에서 발생할 수 있는 모든 에러 타입을 정의합니다.

use std::path::PathBuf;
use thiserror::Error;

/// rextract에서 발생할 수 있는 에러 타입
#[derive(Error, Debug)]
pub enum RextractError {
    /// 패턴이 하나도 지정되지 않음
    #[error("정규식 패턴이 지정되지 않았습니다 (-r 또는 -f 플래그 필요)")]
    NoPatterns,

    /// 정규식 컴파일 실패
    #[error("유효하지 않은 정규식 '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// 명명 캡처 그룹이 없는 정규식
    #[error("정규식 '{pattern}'에 명명 캡처 그룹이 하나 이상 필요합니다")]
    NoNamedGroups { pattern: String },

    /// 정의 파일 열기 실패
    #[error("정의 파일을 열 수 없습니다 ({file}): {reason}")]
    ConfigOpenError { file: PathBuf, reason: String },

    /// 정의 파일 파싱 실패
    #[error("정의 파일 파싱 실패 ({file}): {reason}")]
    ConfigParseError { file: PathBuf, reason: String },

    /// 입력 파일 열기 실패
    #[error("입력 파일을 열 수 없습니다 ({file}): {reason}")]
    InputOpenError { file: PathBuf, reason: String },

    /// 출력 파일 생성 실패
    #[error("출력 파일을 만들 수 없습니다 ({file}): {reason}")]
    OutputCreateError { file: PathBuf, reason: String },

    /// 출력 파일이 이미 존재 (Error 모드에서)
    #[error("출력 파일이 이미 존재합니다: {path}")]
    OutputExists { path: PathBuf },

    /// 입력 스트림 읽기 실패
    #[error("입력 읽기 실패: {reason}")]
    ReadError { reason: String },

    /// 출력 스트림 쓰기 실패
    #[error("출력 쓰기 실패: {reason}")]
    WriteError { reason: String },
}

/// rextract 결과 타입 별칭
pub type Result<T> = std::result::Result<T, RextractError>;
