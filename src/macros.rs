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

/// Concatenate two or more `&str`-like pieces into a new `String`.
#[macro_export]
macro_rules! join {
    ($first:expr $(, $rest:expr)+ $(,)?) => {{
        let mut out = ::std::string::String::from($first);
        $(
            out.push_str($rest);
        )+
        out
    }};
}

#[cfg(test)]
mod tests {
    #[test]
    fn shorthands() {
        assert_eq!(s!(), "");
        assert_eq!(s!("ken"), "ken");
        assert_eq!(join!("ken", "_frame", ".json"), "ken_frame.json");
    }
}
