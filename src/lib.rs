//! Academic Records - 选课同步与成绩统计引擎
//!
//! 维护学生选课与其所在学年的一致性，并把原始考试成绩汇总为
//! 学生、课程、教师三个维度的统计报表。
//!
//! # 架构
//! - `config`: 配置管理
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `models`: 数据模型定义
//! - `services`: 业务逻辑层（选课同步、成绩统计、目录维护）
//! - `storage`: 数据存储层（SeaORM）

pub mod config;
pub mod entity;
pub mod errors;
pub mod models;
pub mod services;
pub mod storage;
