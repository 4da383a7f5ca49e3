// src/macros.rs

#[macro_export]
macro_rules! s {
    // String shorthand!

    // Zero-arg → String::new()
    () => {
        ::std::string::String::new()
    };
    // Any single expression accepted by String::from
    ($expr:expr) => {
        ::std::string::String::from($expr)
    };
}

/// Attribute-map literal: `attrs! { "nameCn" => "安柏", "visionCn" => "火" }`.
#[macro_export]
macro_rules! attrs {
    () => {
        ::std::collections::BTreeMap::<::std::string::String, ::std::string::String>::new()
    };
    ($($key:expr => $val:expr),+ $(,)?) => {{
        let mut map = ::std::collections::BTreeMap::new();
        $( map.insert(::std::string::String::from($key), ::std::string::String::from($val)); )+
        map
    }};
}
