// 儿童电视节目目录后端库
//
// 本库提供节目目录的核心功能，包括：
// - 节目过滤与排序
// - 数据库操作
// - 查询缓存
// - API 路由

pub mod api;
pub mod config;
pub mod database;
pub mod models;
pub mod services;
