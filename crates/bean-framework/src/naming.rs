//! # Default Bean Names
//!
//! Beans registered without an explicit name, and reference fields without an
//! explicit target, are named after a record type: the type's simple name with
//! its first character lower-cased (`app::model::Widget` becomes `widget`).
//! A field declared as a pointer-like wrapper (`Inject<Widget>`, `Arc<Widget>`)
//! is named after the record inside it; a generic record (`Pool<Widget>`) keeps
//! its own name.

use std::any::type_name;

/// Pointer-like wrappers that a structural field may declare around a record.
const POINTER_WRAPPERS: &[&str] = &["Inject", "BeanRef", "Arc", "Rc", "Box", "RwLock", "Mutex"];

/// Returns the unqualified name of a type as printed by [`std::any::type_name`].
///
/// Module paths and the type's own generic arguments are stripped:
/// `app::pool::Pool<app::Widget>` yields `Pool`.
pub fn simple_name(type_name: &str) -> &str {
    let name = strip_reference(type_name);
    let name = name.split('<').next().unwrap_or(name).trim_end();
    name.rsplit("::").next().unwrap_or(name)
}

/// Unwraps the pointer-like wrappers around a declared field type.
///
/// `bean_framework::bean::Inject<app::Widget>` yields `app::Widget`. Any other
/// generic type, a user newtype slot included, is returned as is.
pub fn pointee(type_name: &str) -> &str {
    let mut name = strip_reference(type_name);
    while POINTER_WRAPPERS.contains(&simple_name(name)) {
        let (Some(open), Some(close)) = (name.find('<'), name.rfind('>')) else {
            break;
        };
        if close < open {
            break;
        }
        name = strip_reference(&name[open + 1..close]);
    }
    name
}

fn strip_reference(type_name: &str) -> &str {
    type_name
        .trim()
        .trim_start_matches('&')
        .trim_start_matches("mut ")
        .trim_start_matches("dyn ")
        .trim()
}

/// Derives the default bean name for a type name.
///
/// Returns an empty string when the type name has no simple name.
pub fn derive(type_name: &str) -> String {
    let mut chars = simple_name(type_name).chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Derives the bean name a structural field of the declared type points to.
pub fn derive_slot(declared_type: &str) -> String {
    derive(pointee(declared_type))
}

/// Derives the default bean name for `T`.
pub fn derive_name<T: ?Sized>() -> String {
    derive(type_name::<T>())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Widget;
    struct HTTPClient;

    #[test]
    fn strips_module_path_and_lowercases_initial() {
        assert_eq!(derive("app::model::Widget"), "widget");
        assert_eq!(derive("Widget"), "widget");
        assert_eq!(derive_name::<Widget>(), "widget");
    }

    #[test]
    fn only_the_first_character_changes() {
        assert_eq!(derive_name::<HTTPClient>(), "hTTPClient");
        assert_eq!(derive("userService"), "userService");
    }

    struct Pool<T>(T);
    struct Pair<A, B>(A, B);

    #[test]
    fn generic_records_keep_their_own_name() {
        assert_eq!(derive_name::<Pool<Widget>>(), "pool");
        assert_eq!(derive_name::<Pair<Widget, Pool<HTTPClient>>>(), "pair");
        assert_eq!(derive("app::Pool<app::Widget>"), "pool");
    }

    #[test]
    fn slots_unwrap_pointer_like_wrappers_only() {
        assert_eq!(derive_slot("bean_framework::bean::Inject<app::Widget>"), "widget");
        assert_eq!(
            derive_slot("alloc::sync::Arc<std::sync::RwLock<app::Engine>>"),
            "engine"
        );
        assert_eq!(derive_slot("&mut app::Widget"), "widget");
        assert_eq!(derive_slot("bean_framework::bean::Inject<app::Pool<app::Widget>>"), "pool");
        assert_eq!(derive_slot("app::PrimaryStore"), "primaryStore");
        assert_eq!(derive("bean_framework::bean::Inject<app::Widget>"), "inject");
    }

    #[test]
    fn empty_type_name_gives_empty_bean_name() {
        assert_eq!(derive(""), "");
        assert_eq!(derive_slot("Inject<>"), "");
    }
}
