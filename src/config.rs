//! 정의 파일 로딩 모듈
//!
//! -f 플래그로 지정된 JSON 정의 파일에서 정규식 패턴 배열을 읽어옵니다.

use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::{Result, RextractError};

/// JSON 정의 파일 구조체
///
/// 형식: `{"patterns": ["정규식1", "정규식2", ...]}`
#[derive(Debug, Deserialize)]
pub struct DefinitionFile {
    /// 정규식 패턴 목록 (파일 내 배열 순서 유지)
    pub patterns: Vec<String>,
}

impl DefinitionFile {
    /// 정의 파일을 열어 파싱
    ///
    /// # Arguments
    /// * `path` - JSON 정의 파일 경로
    ///
    /// # Returns
    /// 파싱된 `DefinitionFile` 또는 에러 (열기 실패와 파싱 실패 구분)
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| RextractError::ConfigOpenError {
            file: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let reader = BufReader::new(file);
        serde_json::from_reader(reader).map_err(|e| RextractError::ConfigParseError {
            file: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}
