use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::FieldError;

static ACADEMIC_YEAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})(?:[-/](\d{4}))?$").expect("Invalid academic year regex"));

static SUBJECT_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("Invalid subject code regex"));

/// 名称类字段：去除首尾空白后 1..=max 个字符
pub fn validate_name(value: &str, max: usize) -> Result<(), String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err("不能为空".to_string());
    }
    if trimmed.chars().count() > max {
        return Err(format!("长度不能超过 {max} 个字符"));
    }
    Ok(())
}

/// 学年：`2026` 或 `2025-2026`（后一年必须紧接前一年）
pub fn validate_academic_year(value: &str) -> Result<(), &'static str> {
    let Some(caps) = ACADEMIC_YEAR_RE.captures(value.trim()) else {
        return Err("学年格式应为 YYYY 或 YYYY-YYYY");
    };
    if let (Some(start), Some(end)) = (caps.get(1), caps.get(2)) {
        let start: i32 = start.as_str().parse().map_err(|_| "学年格式无效")?;
        let end: i32 = end.as_str().parse().map_err(|_| "学年格式无效")?;
        if end != start + 1 {
            return Err("学年的结束年份必须是开始年份的下一年");
        }
    }
    Ok(())
}

/// 学期只能是 1、2、3
pub fn validate_term(term: i32) -> Result<(), &'static str> {
    if (1..=3).contains(&term) {
        Ok(())
    } else {
        Err("学期只能是 1、2 或 3")
    }
}

pub fn validate_subject_code(code: &str) -> Result<(), &'static str> {
    if code.is_empty() || code.len() > 16 {
        return Err("科目代码长度必须在 1 到 16 之间");
    }
    if !SUBJECT_CODE_RE.is_match(code) {
        return Err("科目代码只能包含字母、数字、下划线或连字符");
    }
    Ok(())
}

/// 收集单个字段的校验结果
pub fn push_error<E: ToString>(errors: &mut Vec<FieldError>, field: &str, result: Result<(), E>) {
    if let Err(e) = result {
        errors.push(FieldError::new(field, e.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name() {
        assert!(validate_name("Form 1", 64).is_ok());
        assert!(validate_name("   ", 64).is_err());
        assert!(validate_name("abcdef", 5).is_err());
    }

    #[test]
    fn test_academic_year_formats() {
        assert!(validate_academic_year("2026").is_ok());
        assert!(validate_academic_year("2025-2026").is_ok());
        assert!(validate_academic_year("2025/2026").is_ok());
        assert!(validate_academic_year("2025-2027").is_err());
        assert!(validate_academic_year("26").is_err());
        assert!(validate_academic_year("twenty").is_err());
    }

    #[test]
    fn test_term_range() {
        assert!(validate_term(1).is_ok());
        assert!(validate_term(3).is_ok());
        assert!(validate_term(0).is_err());
        assert!(validate_term(4).is_err());
    }

    #[test]
    fn test_subject_code() {
        assert!(validate_subject_code("MATH-101").is_ok());
        assert!(validate_subject_code("").is_err());
        assert!(validate_subject_code("bio logy").is_err());
    }

    #[test]
    fn test_push_error_collects() {
        let mut errors = Vec::new();
        push_error(&mut errors, "term", validate_term(9));
        push_error(&mut errors, "name", validate_name("ok", 10));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "term");
    }
}
