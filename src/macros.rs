// src/macros.rs

/// `String` shorthand: `s!()` is empty, `s!(x)` is `String::from(x)`.
#[macro_export]
macro_rules! s {
    () => {
        ::std::string::String::new()
    };
    ($expr:expr) => {
        ::std::string::String::from($expr)
    };
}

/// Concatenate string slices into a new `String`.
#[macro_export]
macro_rules! join {
    ($first:expr $(, $rest:expr)+ $(,)?) => {{
        let mut s = ::std::string::String::from($first);
        $(
            s.push_str($rest);
        )+
        s
    }};
}

/// Exact-match attribute selector text: `attr_sel!("div", "id", "ENR-2.1")`
/// gives `div[id="ENR-2.1"]`.
#[macro_export]
macro_rules! attr_sel {
    ($tag:expr, $attr:expr, $value:expr) => {
        ::std::format!("{}[{}=\"{}\"]", $tag, $attr, $value)
    };
}
