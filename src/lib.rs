//! ExamSystem - 多校考试与成绩管理后端服务
//!
//! 基于 Actix Web 构建，覆盖考试系列、考试结构、成绩录入、排名与学期汇总。
//!
//! # 架构
//! - `config`: 配置管理
//! - `engine`: 纯计算的计分/排名/汇总引擎
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `models`: 数据模型定义
//! - `routes`: API 路由层
//! - `runtime`: 运行时生命周期管理
//! - `services`: 业务逻辑层
//! - `storage`: 数据存储层（SeaORM）
//! - `utils`: 工具函数

pub mod config;
pub mod engine;
pub mod entity;
pub mod errors;
pub mod models;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;
