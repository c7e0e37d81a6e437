//! HTTP 处理器模块

pub mod auth;
pub mod cat;
pub mod health;
pub mod weight;

use serde::Deserialize;

/// 列表分页参数
#[derive(Debug, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub skip: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    100
}

impl Pagination {
    /// 约束到合理范围，防止恶意的超大分页
    pub fn clamped(&self) -> (i64, i64) {
        (self.limit.clamp(1, 500), self.skip.max(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_defaults() {
        let page: Pagination = serde_json::from_str("{}").unwrap();
        assert_eq!(page.skip, 0);
        assert_eq!(page.limit, 100);
    }

    #[test]
    fn test_pagination_clamped() {
        let page = Pagination {
            skip: -5,
            limit: 10_000,
        };
        assert_eq!(page.clamped(), (500, 0));
    }
}
