// 目录列表后端库
//
// 本库提供漫画目录列表页的核心功能，包括：
// - 筛选条件解析与名称查询
// - 参数化查询构建（计数 + 分页）
// - 排序白名单与分页计算
// - 导航链接生成
// - API 路由

pub mod api;
pub mod config;
pub mod database;
pub mod models;
pub mod services;
