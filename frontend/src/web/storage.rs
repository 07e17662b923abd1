//! LocalStorage 封装模块
//!
//! 只保存上次登录成功的用户名用于自动填充，密码和会话永远不落盘。

use gloo_storage::{LocalStorage, Storage};

const STORAGE_USERNAME_KEY: &str = "skydeck_last_username";

/// 上次登录成功的用户名
pub fn remembered_username() -> Option<String> {
    LocalStorage::get::<String>(STORAGE_USERNAME_KEY)
        .ok()
        .filter(|name| !name.is_empty())
}

/// 记住用户名，写入失败（如隐私模式）时静默忽略
pub fn remember_username(username: &str) {
    if let Err(e) = LocalStorage::set(STORAGE_USERNAME_KEY, username) {
        log::debug!("[Storage] failed to remember username: {}", e);
    }
}
