use once_cell::sync::Lazy;
use regex::Regex;

static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("Invalid username regex"));

static YOUTUBE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https?://(www\.)?(youtube\.com/|youtu\.be/)\S+$").expect("Invalid youtube regex")
});

pub fn validate_username(username: &str) -> Result<(), &'static str> {
    // 用户名长度校验：3 <= x <= 32
    if username.len() < 3 || username.len() > 32 {
        return Err("Username length must be between 3 and 32 characters");
    }
    // 用户名格式校验：只能包含字母、数字、下划线或连字符
    if !USERNAME_RE.is_match(username) {
        return Err("Username must contain only letters, numbers, underscores or hyphens");
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), &'static str> {
    // 密码长度校验：至少 6 个字符
    if password.len() < 6 {
        return Err("Password must be at least 6 characters long");
    }
    if password.len() > 128 {
        return Err("Password must be at most 128 characters long");
    }
    Ok(())
}

/// 校验 YouTube 链接（材料的 youtube_url 字段可选，但给了就必须合法）
pub fn validate_youtube_url(url: &str) -> Result<(), &'static str> {
    if !YOUTUBE_RE.is_match(url) {
        return Err("youtube_url must be a valid YouTube link");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_username() {
        assert!(validate_username("petani_01").is_ok());
        assert!(validate_username("abc").is_ok());
        assert!(validate_username("user-name").is_ok());
    }

    #[test]
    fn test_username_too_short() {
        assert!(validate_username("ab").is_err());
        assert!(validate_username("").is_err());
    }

    #[test]
    fn test_username_bad_chars() {
        assert!(validate_username("user name").is_err());
        assert!(validate_username("user@mail").is_err());
    }

    #[test]
    fn test_password_length() {
        assert!(validate_password("123456").is_ok());
        assert!(validate_password("12345").is_err());
        assert!(validate_password(&"x".repeat(129)).is_err());
    }

    #[test]
    fn test_youtube_url() {
        assert!(validate_youtube_url("https://www.youtube.com/watch?v=dQw4w9WgXcQ").is_ok());
        assert!(validate_youtube_url("https://youtu.be/dQw4w9WgXcQ").is_ok());
        assert!(validate_youtube_url("https://example.com/video").is_err());
        assert!(validate_youtube_url("youtube.com/watch?v=x").is_err());
    }
}
