//! 패턴 집합 모듈
//!
//! 정규식 패턴 문자열 목록을 컴파일하고 명명 캡처 그룹 존재를 검증합니다.

use regex::Regex;

use crate::error::{Result, RextractError};

/// 컴파일된 단일 패턴
///
/// 컴파일된 정규식과 선언 순서대로 수집된 명명 그룹 이름 목록을 보관합니다.
/// 전체 매칭 슬롯(인덱스 0)과 이름 없는 그룹은 목록에서 제외됩니다.
#[derive(Debug)]
pub struct Pattern {
    regex: Regex,
    group_names: Vec<String>,
}

impl Pattern {
    /// 패턴 문자열을 컴파일하고 명명 그룹을 검증
    ///
    /// # Arguments
    /// * `raw` - 정규식 패턴 문자열
    ///
    /// # Returns
    /// 컴파일된 `Pattern` 또는 에러 (컴파일 실패, 명명 그룹 없음)
    pub fn compile(raw: &str) -> Result<Self> {
        let regex = Regex::new(raw).map_err(|e| RextractError::InvalidPattern {
            pattern: raw.to_string(),
            reason: e.to_string(),
        })?;

        let group_names: Vec<String> = regex
            .capture_names()
            .flatten()
            .map(|name| name.to_string())
            .collect();

        if group_names.is_empty() {
            return Err(RextractError::NoNamedGroups {
                pattern: raw.to_string(),
            });
        }

        Ok(Self { regex, group_names })
    }

    /// 컴파일된 정규식 반환
    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    /// 명명 그룹 이름 목록 반환 (선언 순서)
    pub fn group_names(&self) -> &[String] {
        &self.group_names
    }

    /// 원본 패턴 문자열 반환
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

/// 컴파일된 패턴의 순서 있는 집합
///
/// 생성 이후 불변이며, 순서는 입력 목록의 순서를 그대로 따릅니다
/// (CLI -r 플래그 순서, 그 뒤에 정의 파일 배열 순서).
#[derive(Debug)]
pub struct PatternSet {
    patterns: Vec<Pattern>,
}

impl PatternSet {
    /// 패턴 문자열 목록을 컴파일하여 패턴 집합 생성
    ///
    /// 빈 목록, 컴파일 실패, 명명 그룹 없는 패턴은 모두 설정 시점 에러로
    /// 처리되어 라인 처리가 시작되기 전에 실패합니다.
    ///
    /// # Examples
    /// ```
    /// use rextract::pattern::PatternSet;
    ///
    /// let set = PatternSet::compile(&["user=(?P<user>\\w+)".to_string()]).unwrap();
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn compile(raw_patterns: &[String]) -> Result<Self> {
        if raw_patterns.is_empty() {
            return Err(RextractError::NoPatterns);
        }

        let patterns = raw_patterns
            .iter()
            .map(|raw| Pattern::compile(raw))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { patterns })
    }

    /// 패턴 수 반환
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// 패턴이 없는지 확인
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// 패턴 순회 (집합 순서 유지)
    pub fn iter(&self) -> std::slice::Iter<'_, Pattern> {
        self.patterns.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_with_named_group() {
        let pattern = Pattern::compile(r"user=(?P<user>\w+)").unwrap();
        assert_eq!(pattern.group_names(), &["user".to_string()]);
    }

    #[test]
    fn test_compile_multiple_named_groups_in_order() {
        let pattern =
            Pattern::compile(r"(?P<ip>\S+) (?P<user>\S+) \[(?P<date>[^\]]+)\]").unwrap();
        assert_eq!(
            pattern.group_names(),
            &["ip".to_string(), "user".to_string(), "date".to_string()]
        );
    }

    #[test]
    fn test_unnamed_groups_are_skipped() {
        let pattern = Pattern::compile(r"(\w+)=(?P<value>\w+)").unwrap();
        assert_eq!(pattern.group_names(), &["value".to_string()]);
    }

    #[test]
    fn test_compile_invalid_regex() {
        let result = Pattern::compile(r"(?P<broken>[");
        assert!(matches!(
            result,
            Err(RextractError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_compile_without_named_group_rejected() {
        let result = Pattern::compile(r"(\d+)-(\d+)");
        assert!(matches!(
            result,
            Err(RextractError::NoNamedGroups { pattern }) if pattern == r"(\d+)-(\d+)"
        ));
    }

    #[test]
    fn test_compile_no_groups_at_all_rejected() {
        let result = Pattern::compile(r"plain text");
        assert!(matches!(result, Err(RextractError::NoNamedGroups { .. })));
    }

    #[test]
    fn test_pattern_set_empty_list() {
        let result = PatternSet::compile(&[]);
        assert!(matches!(result, Err(RextractError::NoPatterns)));
    }

    #[test]
    fn test_pattern_set_preserves_order() {
        let set = PatternSet::compile(&[
            r"a=(?P<a>\w+)".to_string(),
            r"b=(?P<b>\w+)".to_string(),
            r"c=(?P<c>\w+)".to_string(),
        ])
        .unwrap();

        let sources: Vec<&str> = set.iter().map(|p| p.as_str()).collect();
        assert_eq!(sources, vec![r"a=(?P<a>\w+)", r"b=(?P<b>\w+)", r"c=(?P<c>\w+)"]);
    }

    #[test]
    fn test_pattern_set_fails_on_first_bad_pattern() {
        let result = PatternSet::compile(&[
            r"ok=(?P<ok>\w+)".to_string(),
            r"(?P<bad>[".to_string(),
        ]);
        assert!(matches!(
            result,
            Err(RextractError::InvalidPattern { pattern, .. }) if pattern == r"(?P<bad>["
        ));
    }
}
