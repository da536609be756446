//! 라인 병합 모듈
//!
//! 한 라인에 패턴 집합의 모든 정규식을 순서대로 적용하고,
//! 명명 캡처 결과를 하나의 레코드로 병합하는 핵심 알고리즘입니다.

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

use crate::pattern::PatternSet;

/// 필드 값: 단일 문자열 또는 문자열 배열
///
/// 같은 필드 이름이 두 번째로 캡처되는 순간 스칼라에서 배열로 승격됩니다.
/// 승격 이후에는 배열에 값이 추가될 뿐 다시 스칼라로 돌아가지 않습니다.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// 단일 값
    Scalar(String),
    /// 캡처 순서를 유지하는 다중 값
    List(Vec<String>),
}

impl FieldValue {
    /// 새 캡처 값을 기존 값에 병합
    ///
    /// 병합 규칙:
    /// - 스칼라 + 동일 값 + unique → 스칼라 유지 (승격 없음)
    /// - 스칼라 + 그 외 → `[기존, 새 값]` 배열로 승격
    /// - 배열 + unique + 이미 포함된 값 → 무시
    /// - 배열 + 그 외 → 뒤에 추가
    fn merge(&mut self, value: &str, unique: bool) {
        match self {
            FieldValue::Scalar(existing) => {
                if unique && existing == value {
                    return;
                }
                let promoted = vec![existing.clone(), value.to_string()];
                *self = FieldValue::List(promoted);
            }
            FieldValue::List(values) => {
                if unique && values.iter().any(|v| v == value) {
                    return;
                }
                values.push(value.to_string());
            }
        }
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            FieldValue::Scalar(value) => serializer.serialize_str(value),
            FieldValue::List(values) => {
                let mut seq = serializer.serialize_seq(Some(values.len()))?;
                for value in values {
                    seq.serialize_element(value)?;
                }
                seq.end()
            }
        }
    }
}

/// 라인 하나의 병합 결과 레코드
///
/// 필드 이름 → 값의 매핑이며, 키는 첫 등장 순서를 유지합니다.
/// 라인마다 새로 만들어지고 직렬화 후 버려집니다.
#[derive(Debug, Default, PartialEq)]
pub struct Record {
    entries: Vec<(String, FieldValue)>,
}

impl Record {
    /// 빈 레코드 생성
    pub fn new() -> Self {
        Self::default()
    }

    /// 캡처 값 하나를 레코드에 병합
    ///
    /// 이름이 처음 등장하면 스칼라로 저장하고, 이미 있으면
    /// `FieldValue::merge` 규칙을 따릅니다.
    pub fn merge_capture(&mut self, name: &str, value: &str, unique: bool) {
        match self.entries.iter_mut().find(|(n, _)| n == name) {
            Some((_, existing)) => existing.merge(value, unique),
            None => self
                .entries
                .push((name.to_string(), FieldValue::Scalar(value.to_string()))),
        }
    }

    /// 필드 수 반환
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 아무 필드도 없는지 확인 (매칭된 패턴 없음 = 출력 생략)
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 이름으로 필드 값 조회
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// 필드 이름 목록 반환 (첫 등장 순서)
    pub fn field_names(&self) -> Vec<&str> {
        self.entries.iter().map(|(n, _)| n.as_str()).collect()
    }

    /// 레코드를 한 줄 JSON 문자열로 직렬화
    pub fn to_json_line(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// 한 라인에 패턴 집합을 적용하여 병합 레코드 생성
///
/// 각 패턴은 라인 전체에 대해 첫 매칭만 시도합니다 (라인 내 반복 매칭 없음).
/// 매칭된 패턴의 명명 그룹을 선언 순서대로 레코드에 병합하며, 매칭에
/// 참여하지 않은 명명 그룹은 빈 문자열 캡처와 동일하게 취급합니다.
/// 어떤 패턴도 매칭되지 않으면 빈 레코드를 반환합니다 (에러 아님).
///
/// # Arguments
/// * `patterns` - 컴파일된 패턴 집합
/// * `line` - 입력 라인
/// * `unique` - 다중 값 필드의 중복 제거 여부
///
/// # Examples
/// ```
/// use rextract::merger::merge_line;
/// use rextract::pattern::PatternSet;
///
/// let set = PatternSet::compile(&[r"level=(?P<level>\w+)".to_string()]).unwrap();
/// let record = merge_line(&set, "level=error", false);
/// assert_eq!(record.to_json_line().unwrap(), r#"{"level":"error"}"#);
/// ```
pub fn merge_line(patterns: &PatternSet, line: &str, unique: bool) -> Record {
    let mut record = Record::new();

    for pattern in patterns.iter() {
        let captures = match pattern.regex().captures(line) {
            Some(captures) => captures,
            None => continue,
        };

        for name in pattern.group_names() {
            // 매칭에 참여하지 않은 그룹은 빈 문자열로 정규화
            let value = captures.name(name).map(|m| m.as_str()).unwrap_or("");
            record.merge_capture(name, value, unique);
        }
    }

    record
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(patterns: &[&str]) -> PatternSet {
        let raw: Vec<String> = patterns.iter().map(|p| p.to_string()).collect();
        PatternSet::compile(&raw).unwrap()
    }

    #[test]
    fn test_no_match_yields_empty_record() {
        let patterns = set(&[r"user=(?P<user>\w+)"]);
        let record = merge_line(&patterns, "nothing to see here", false);
        assert!(record.is_empty());
    }

    #[test]
    fn test_single_pattern_scalar() {
        let patterns = set(&[r"user=(?P<user>\w+)"]);
        let record = merge_line(&patterns, "login user=frank ok", false);

        assert_eq!(
            record.get("user"),
            Some(&FieldValue::Scalar("frank".to_string()))
        );
        assert_eq!(record.to_json_line().unwrap(), r#"{"user":"frank"}"#);
    }

    #[test]
    fn test_first_match_only_within_line() {
        let patterns = set(&[r"id=(?P<id>\d+)"]);
        let record = merge_line(&patterns, "id=1 id=2 id=3", false);

        // 라인 내 반복 매칭은 하지 않음
        assert_eq!(record.get("id"), Some(&FieldValue::Scalar("1".to_string())));
    }

    #[test]
    fn test_promotion_on_distinct_values() {
        let patterns = set(&[r"user=(?P<name>\w+)", r"admin:(?P<name>\w+)"]);
        let record = merge_line(&patterns, "user=admin admin:root", false);

        assert_eq!(
            record.get("name"),
            Some(&FieldValue::List(vec![
                "admin".to_string(),
                "root".to_string()
            ]))
        );
    }

    #[test]
    fn test_promotion_regardless_of_unique_when_distinct() {
        let patterns = set(&[r"user=(?P<name>\w+)", r"admin:(?P<name>\w+)"]);
        let record = merge_line(&patterns, "user=admin admin:root", true);

        assert_eq!(
            record.to_json_line().unwrap(),
            r#"{"name":["admin","root"]}"#
        );
    }

    #[test]
    fn test_duplicate_without_unique_promotes() {
        let patterns = set(&[r"a=(?P<name>\w+)", r"b=(?P<name>\w+)"]);
        let record = merge_line(&patterns, "a=admin b=admin", false);

        assert_eq!(
            record.get("name"),
            Some(&FieldValue::List(vec![
                "admin".to_string(),
                "admin".to_string()
            ]))
        );
    }

    #[test]
    fn test_duplicate_with_unique_stays_scalar() {
        let patterns = set(&[r"a=(?P<name>\w+)", r"b=(?P<name>\w+)"]);
        let record = merge_line(&patterns, "a=admin b=admin", true);

        // 중복이 승격 전에 걸러지므로 스칼라 유지
        assert_eq!(
            record.get("name"),
            Some(&FieldValue::Scalar("admin".to_string()))
        );
        assert_eq!(record.to_json_line().unwrap(), r#"{"name":"admin"}"#);
    }

    #[test]
    fn test_three_way_duplication_with_unique() {
        let patterns = set(&[
            r"a=(?P<name>\w+)",
            r"b=(?P<name>\w+)",
            r"c=(?P<name>\w+)",
        ]);
        let record = merge_line(&patterns, "a=admin b=root c=admin", true);

        assert_eq!(
            record.get("name"),
            Some(&FieldValue::List(vec![
                "admin".to_string(),
                "root".to_string()
            ]))
        );
    }

    #[test]
    fn test_three_way_duplication_without_unique() {
        let patterns = set(&[
            r"a=(?P<name>\w+)",
            r"b=(?P<name>\w+)",
            r"c=(?P<name>\w+)",
        ]);
        let record = merge_line(&patterns, "a=admin b=root c=admin", false);

        assert_eq!(
            record.get("name"),
            Some(&FieldValue::List(vec![
                "admin".to_string(),
                "root".to_string(),
                "admin".to_string()
            ]))
        );
    }

    #[test]
    fn test_independent_patterns_merge_fields() {
        let patterns = set(&[r"level=(?P<level>\w+)", r"status=(?P<status>\d+)"]);
        let record = merge_line(
            &patterns,
            "request failed with level=error, status=500",
            false,
        );

        assert_eq!(
            record.to_json_line().unwrap(),
            r#"{"level":"error","status":"500"}"#
        );
    }

    #[test]
    fn test_field_order_is_first_appearance() {
        let patterns = set(&[
            r"status=(?P<status>\d+)",
            r"level=(?P<level>\w+)",
            r"status=(?P<status>\d+)",
        ]);
        let record = merge_line(&patterns, "level=warn status=404", false);

        assert_eq!(record.field_names(), vec!["status", "level"]);
    }

    #[test]
    fn test_empty_capture_is_present_value() {
        let patterns = set(&[r"tag=(?P<tag>\w*)"]);
        let record = merge_line(&patterns, "tag= rest", false);

        assert_eq!(record.get("tag"), Some(&FieldValue::Scalar(String::new())));
        assert_eq!(record.to_json_line().unwrap(), r#"{"tag":""}"#);
    }

    #[test]
    fn test_non_participating_group_is_empty_string() {
        // 대안 분기 안의 명명 그룹은 매칭에 참여하지 않을 수 있음
        let patterns = set(&[r"(?:num=(?P<num>\d+)|word=(?P<word>\w+))"]);
        let record = merge_line(&patterns, "word=hello", false);

        // num 그룹은 참여하지 않았지만 빈 문자열 캡처와 동일하게 취급
        assert_eq!(record.get("num"), Some(&FieldValue::Scalar(String::new())));
        assert_eq!(
            record.get("word"),
            Some(&FieldValue::Scalar("hello".to_string()))
        );
    }

    #[test]
    fn test_apache_style_line_all_scalars() {
        let patterns = set(&[
            r#"(?P<client_ip>\S+) \S+ (?P<user>\S+) \[(?P<date>[^\]]+)\] "(?P<method>\S+) (?P<uri>\S+)" (?P<status>\d+)"#,
        ]);
        let record = merge_line(
            &patterns,
            r#"127.0.0.1 - frank [10/Oct/2000] "GET /api" 200"#,
            false,
        );

        assert_eq!(record.len(), 6);
        assert_eq!(
            record.get("client_ip"),
            Some(&FieldValue::Scalar("127.0.0.1".to_string()))
        );
        assert_eq!(
            record.get("user"),
            Some(&FieldValue::Scalar("frank".to_string()))
        );
        assert_eq!(
            record.get("date"),
            Some(&FieldValue::Scalar("10/Oct/2000".to_string()))
        );
        assert_eq!(
            record.get("method"),
            Some(&FieldValue::Scalar("GET".to_string()))
        );
        assert_eq!(
            record.get("uri"),
            Some(&FieldValue::Scalar("/api".to_string()))
        );
        assert_eq!(
            record.get("status"),
            Some(&FieldValue::Scalar("200".to_string()))
        );
    }

    #[test]
    fn test_json_round_trip_preserves_shape() {
        let patterns = set(&[
            r"a=(?P<name>\w+)",
            r"b=(?P<name>\w+)",
            r"host=(?P<host>\S+)",
        ]);
        let record = merge_line(&patterns, "a=admin b=root host=web01", false);

        let json_line = record.to_json_line().unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json_line).unwrap();
        let object = parsed.as_object().unwrap();

        assert_eq!(object.len(), 2);
        assert_eq!(
            object.get("name").unwrap().as_array().unwrap(),
            &vec![
                serde_json::Value::String("admin".to_string()),
                serde_json::Value::String("root".to_string())
            ]
        );
        assert_eq!(object.get("host").unwrap().as_str().unwrap(), "web01");
    }
}
