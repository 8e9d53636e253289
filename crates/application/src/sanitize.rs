//! Log-injection protection for user-controlled strings

/// Replace line breaks and tabs so a value cannot forge extra log lines
///
/// `None` renders as `"null"`.
///
/// # Examples
///
/// ```
/// use application::sanitize_for_log;
///
/// assert_eq!(sanitize_for_log("a\nb"), "a_b");
/// assert_eq!(sanitize_for_log(None), "null");
/// ```
pub fn sanitize_for_log<'a>(value: impl Into<Option<&'a str>>) -> String {
    value.into().map_or_else(
        || "null".to_string(),
        |v| v.replace(['\n', '\r', '\t'], "_"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_control_whitespace() {
        assert_eq!(sanitize_for_log("a\r\nb\tc"), "a__b_c");
    }

    #[test]
    fn plain_text_unchanged() {
        assert_eq!(sanitize_for_log("item-42"), "item-42");
    }

    #[test]
    fn none_is_null() {
        assert_eq!(sanitize_for_log(None::<&str>), "null");
    }
}
