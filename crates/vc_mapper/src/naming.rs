//! Name conversions between wire keys, fields and accessor methods.
//!
//! ## Menu
//!
//! - [`snake_case`]: default wire key of a field, `userAgent` -> `user_agent`.
//! - [`studly_case`]: `request_num` -> `RequestNum`.
//! - [`upper_first`]: `auth_key` -> `Auth_key`.
//! - [`setter_name`] / [`getter_name`]: accessor names derived from a field.

use alloc::string::String;

/// Converts a field name into its default wire key.
///
/// Names made of lowercase ASCII letters only are returned as is.
/// Otherwise words are joined, an `_` is placed before every ASCII
/// uppercase letter that follows another character, and the result
/// is lowercased.
///
/// # Examples
///
/// ```
/// use vc_mapper::naming::snake_case;
///
/// assert_eq!(snake_case("subscribedTimes"), "subscribed_times");
/// assert_eq!(snake_case("active"), "active");
/// assert_eq!(snake_case("_id"), "_id");
/// ```
pub fn snake_case(name: &str) -> String {
    if !name.is_empty() && name.bytes().all(|b| b.is_ascii_lowercase()) {
        return name.into();
    }

    let joined: String = name.split_whitespace().map(upper_first).collect();

    let mut out = String::with_capacity(joined.len() + 4);
    for (index, ch) in joined.chars().enumerate() {
        if index > 0 && ch.is_ascii_uppercase() {
            out.push('_');
        }
        out.extend(ch.to_lowercase());
    }
    out
}

/// Converts a key into StudlyCase, treating `-`, `_` and spaces as
/// word separators.
///
/// # Examples
///
/// ```
/// use vc_mapper::naming::studly_case;
///
/// assert_eq!(studly_case("request_num"), "RequestNum");
/// assert_eq!(studly_case("device-type"), "DeviceType");
/// ```
pub fn studly_case(key: &str) -> String {
    key.split(['-', '_', ' ']).map(upper_first).collect()
}

/// Uppercases the first character, leaving the rest untouched.
///
/// # Examples
///
/// ```
/// use vc_mapper::naming::upper_first;
///
/// assert_eq!(upper_first("auth_key"), "Auth_key");
/// ```
pub fn upper_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Name of the setter owning `field`: `set` + [`upper_first`].
#[inline]
pub fn setter_name(field: &str) -> String {
    let mut name = String::from("set");
    name.push_str(&upper_first(field));
    name
}

/// Name of the getter owning `field`: `get` + [`upper_first`].
#[inline]
pub fn getter_name(field: &str) -> String {
    let mut name = String::from("get");
    name.push_str(&upper_first(field));
    name
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snake_case_of_camel_fields() {
        assert_eq!(snake_case("userAgent"), "user_agent");
        assert_eq!(snake_case("deviceInfo"), "device_info");
        assert_eq!(snake_case("createdAt"), "created_at");
        assert_eq!(snake_case("URL"), "u_r_l");
    }

    #[test]
    fn snake_case_keeps_existing_underscores() {
        assert_eq!(snake_case("req_id"), "req_id");
        assert_eq!(snake_case("_id"), "_id");
        assert_eq!(snake_case("Title"), "title");
    }

    #[test]
    fn studly_case_of_wire_keys() {
        assert_eq!(studly_case("auth_key"), "AuthKey");
        assert_eq!(studly_case("request_num"), "RequestNum");
        assert_eq!(studly_case("company"), "Company");
        assert_eq!(studly_case(""), "");
    }

    #[test]
    fn accessor_names() {
        assert_eq!(setter_name("auth_key"), "setAuth_key");
        assert_eq!(setter_name("subscribedTimes"), "setSubscribedTimes");
        assert_eq!(getter_name("_id"), "get_id");
        assert_eq!(getter_name("company"), "getCompany");
    }
}
