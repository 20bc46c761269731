use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Default path of the subjects-by-department endpoint
pub const SUBJECTS_ENDPOINT: &str = "/exams/admin/api/subjects-by-department/";

/// Query parameter carrying the department code
pub const DEPARTMENT_PARAM: &str = "department";

/// Same unreserved set as `encodeURIComponent`
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode a single query component
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

/// Build the request URL for a department code
///
/// `base_path` is used verbatim; an existing query string is extended
/// with `&` rather than replaced.
pub fn subjects_url(base_path: &str, department_code: &str) -> String {
    let sep = if base_path.contains('?') { '&' } else { '?' };
    format!(
        "{base_path}{sep}{DEPARTMENT_PARAM}={}",
        encode_component(department_code)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_code() {
        assert_eq!(
            subjects_url(SUBJECTS_ENDPOINT, "BCA"),
            "/exams/admin/api/subjects-by-department/?department=BCA"
        );
    }

    #[test]
    fn test_reserved_characters_are_encoded() {
        assert_eq!(encode_component("IT & CS"), "IT%20%26%20CS");
        assert_eq!(encode_component("a/b?c=d"), "a%2Fb%3Fc%3Dd");
    }

    #[test]
    fn test_unreserved_marks_pass_through() {
        assert_eq!(encode_component("B.Sc-(IT)_*!~'"), "B.Sc-(IT)_*!~'");
    }

    #[test]
    fn test_non_ascii_is_utf8_encoded() {
        assert_eq!(encode_component("é"), "%C3%A9");
    }

    #[test]
    fn test_existing_query_is_extended() {
        assert_eq!(
            subjects_url("/api/subjects/?v=2", "IT"),
            "/api/subjects/?v=2&department=IT"
        );
    }
}
