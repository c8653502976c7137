//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_examsystem_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum ExamSystemError {
            $($variant(String),)*
        }

        impl ExamSystemError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(ExamSystemError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(ExamSystemError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(ExamSystemError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl ExamSystemError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        ExamSystemError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_examsystem_errors! {
    DatabaseConfig("E001", "Database Configuration Error"),
    DatabaseConnection("E002", "Database Connection Error"),
    DatabaseOperation("E003", "Database Operation Error"),
    Validation("E004", "Validation Error"),
    NotFound("E005", "Resource Not Found"),
    Conflict("E006", "Resource Conflict"),
    InvalidTransition("E007", "Invalid State Transition"),
    Serialization("E008", "Serialization Error"),
    DateParse("E009", "Date Parse Error"),
    FileOperation("E010", "File Operation Error"),
}

impl ExamSystemError {
    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    /// 对应的 HTTP 状态码
    pub fn status_code(&self) -> u16 {
        match self {
            ExamSystemError::NotFound(_) => 404,
            ExamSystemError::Conflict(_) | ExamSystemError::InvalidTransition(_) => 409,
            ExamSystemError::Validation(_) => 422,
            _ => 500,
        }
    }
}

impl fmt::Display for ExamSystemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for ExamSystemError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for ExamSystemError {
    fn from(err: sea_orm::DbErr) -> Self {
        match err.sql_err() {
            Some(sea_orm::SqlErr::UniqueConstraintViolation(detail)) => {
                ExamSystemError::Conflict(detail)
            }
            _ => ExamSystemError::DatabaseOperation(err.to_string()),
        }
    }
}

impl From<std::io::Error> for ExamSystemError {
    fn from(err: std::io::Error) -> Self {
        ExamSystemError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for ExamSystemError {
    fn from(err: serde_json::Error) -> Self {
        ExamSystemError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for ExamSystemError {
    fn from(err: chrono::ParseError) -> Self {
        ExamSystemError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ExamSystemError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(ExamSystemError::database_config("test").code(), "E001");
        assert_eq!(ExamSystemError::validation("test").code(), "E004");
        assert_eq!(ExamSystemError::conflict("test").code(), "E006");
        assert_eq!(ExamSystemError::invalid_transition("test").code(), "E007");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            ExamSystemError::not_found("test").error_type(),
            "Resource Not Found"
        );
        assert_eq!(
            ExamSystemError::validation("test").error_type(),
            "Validation Error"
        );
    }

    #[test]
    fn test_error_message() {
        let err = ExamSystemError::validation("Invalid input");
        assert_eq!(err.message(), "Invalid input");
    }

    #[test]
    fn test_format_simple() {
        let err = ExamSystemError::conflict("paper 1 exists");
        let formatted = err.format_simple();
        assert!(formatted.contains("Resource Conflict"));
        assert!(formatted.contains("paper 1 exists"));
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(ExamSystemError::not_found("x").status_code(), 404);
        assert_eq!(ExamSystemError::conflict("x").status_code(), 409);
        assert_eq!(ExamSystemError::invalid_transition("x").status_code(), 409);
        assert_eq!(ExamSystemError::validation("x").status_code(), 422);
        assert_eq!(ExamSystemError::database_operation("x").status_code(), 500);
    }

    #[test]
    fn test_plain_db_error_is_operation_error() {
        let err: ExamSystemError = sea_orm::DbErr::Custom("boom".to_string()).into();
        assert_eq!(err.code(), "E003");
    }
}
