/// Builds a [`Record`](crate::stmt::Record) from `key => value` pairs,
/// preserving the order the keys are written in.
///
/// ```
/// let user = strata_core::record! { "id" => 1, "name" => "ftest1" };
/// assert_eq!(user.keys().collect::<Vec<_>>(), ["id", "name"]);
/// ```
#[macro_export]
macro_rules! record {
    () => {
        $crate::stmt::Record::new()
    };
    (
        $( $key:expr => $value:expr ),+ $(,)?
    ) => {{
        let mut record = $crate::stmt::Record::new();
        $(
            record.insert($key, $value);
        )+
        record
    }};
}
