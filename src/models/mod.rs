//! 数据模型模块
//! 用户与认证模型、猫与体重记录模型

pub mod auth;
pub mod cat;
pub mod user;
pub mod weight;
