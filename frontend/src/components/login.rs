use crate::auth::use_auth;
use crate::web::router::use_router;
use crate::web::storage;
use leptos::prelude::*;
use leptos::task::spawn_local;
use skydeck::{AppRoute, AuthError};

/// 表单校验，返回去掉首尾空白的用户名和原样的密码
fn validate_login_input(username: &str, password: &str) -> Result<(String, String), &'static str> {
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err("请输入用户名和密码");
    }
    Ok((username.to_string(), password.to_string()))
}

/// 把登录失败转成给用户看的提示
fn login_error_message(err: &AuthError) -> String {
    match err {
        AuthError::MissingCredentials => "请输入用户名和密码".to_string(),
        AuthError::InvalidCredentials => "用户名或密码错误".to_string(),
        AuthError::Forbidden(msg) => format!("账号无法登录: {}", msg),
        AuthError::Timeout => "认证服务响应超时，请稍后重试".to_string(),
        AuthError::Network(_) => "无法连接认证服务".to_string(),
        other => format!("登录失败 [{}]: {}", other.error_code(), other),
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();
    let is_authenticated = auth.is_authenticated_signal();

    let (username, set_username) = signal(storage::remembered_username().unwrap_or_default());
    let (password, set_password) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    // 已登录时离开登录页
    Effect::new(move |_| {
        if is_authenticated.get() {
            router.navigate(AppRoute::Home.to_path());
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if is_submitting.get_untracked() {
            return;
        }

        let (name, pass) = match validate_login_input(&username.get_untracked(), &password.get_untracked()) {
            Ok(input) => input,
            Err(msg) => {
                set_error_msg.set(Some(msg.to_string()));
                return;
            }
        };

        set_is_submitting.set(true);
        set_error_msg.set(None);

        spawn_local(async move {
            match auth.login(name, pass).await {
                // 跳转由上面的 Effect 处理
                Ok(_) => set_password.set(String::new()),
                Err(e) => set_error_msg.set(Some(login_error_message(&e))),
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="login-page">
            <form class="login-card" on:submit=on_submit>
                <h1>"SkyDeck"</h1>
                <p class="login-card__subtitle">"无人机推流与 AI 分析平台"</p>

                <Show when=move || error_msg.get().is_some()>
                    <div role="alert" class="login-error">
                        {move || error_msg.get().unwrap_or_default()}
                    </div>
                </Show>

                <label for="username">"用户名"</label>
                <input
                    id="username"
                    type="text"
                    autocomplete="username"
                    on:input=move |ev| set_username.set(event_target_value(&ev))
                    prop:value=username
                    required
                />

                <label for="password">"密码"</label>
                <input
                    id="password"
                    type="password"
                    autocomplete="current-password"
                    on:input=move |ev| set_password.set(event_target_value(&ev))
                    prop:value=password
                    required
                />

                <button type="submit" disabled=move || is_submitting.get()>
                    {move || if is_submitting.get() { "登录中..." } else { "登录" }}
                </button>
            </form>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_trims_username_but_not_password() {
        assert_eq!(
            validate_login_input("  pilot ", " pw "),
            Ok(("pilot".to_string(), " pw ".to_string()))
        );
    }

    #[test]
    fn validate_requires_both_fields() {
        assert!(validate_login_input("   ", "pw").is_err());
        assert!(validate_login_input("pilot", "").is_err());
    }

    #[test]
    fn error_messages() {
        assert_eq!(login_error_message(&AuthError::InvalidCredentials), "用户名或密码错误");
        assert_eq!(
            login_error_message(&AuthError::Forbidden("Account banned: spam".into())),
            "账号无法登录: Account banned: spam"
        );
        assert_eq!(
            login_error_message(&AuthError::InvalidResponse("x".into())),
            "登录失败 [INVALID_RESPONSE]: invalid response: x"
        );
    }
}
