//! rextract - REGEX FIELD EXTRACTOR
//!
//! 정규식 명명 캡처 그룹으로 텍스트 라인에서 필드를 추출해
//! 라인당 하나의 JSON 객체(JSONL)로 병합 출력하는 CLI 도구입니다.
//!
//! # 주요 기능
//!
//! - 🔍 **다중 패턴 병합**: 여러 정규식을 한 라인에 순서대로 적용 후 결과 병합
//! - 📚 **배열 승격**: 같은 필드가 두 번 캡처되면 스칼라에서 배열로 승격
//! - 🧹 **중복 제거**: --unique 플래그로 배열 내 값 중복 제거
//! - 📝 **정의 파일**: JSON 파일({"patterns": [...]})로 패턴 일괄 지정
//! - 🔁 **스트림 처리**: 파일 또는 표준 입출력, 라인 단위 동기 처리
//! - 📈 **상세 통계**: 라인 수, 매칭률, 입출력 용량 등 stderr 표시
//!
//! # 예제
//!
//! ```bash
//! # 기본 사용법
//! rextract -r 'user=(?P<user>\w+)' -i access.log -o result.jsonl
//!
//! # 여러 패턴 병합
//! rextract -r 'level=(?P<level>\w+)' -r 'status=(?P<status>\d+)' < app.log
//!
//! # 정의 파일 + 중복 제거
//! rextract -f patterns.json --unique -i app.log
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod merger;
pub mod pattern;
pub mod processor;
pub mod stats;

// Re-exports for convenient access
pub use cli::{Args, WriteMode};
pub use config::DefinitionFile;
pub use error::{Result, RextractError};
pub use merger::{merge_line, FieldValue, Record};
pub use pattern::{Pattern, PatternSet};
pub use processor::{process_lines, ProcessOptions};
pub use stats::{format_bytes, Statistics};
