/// Delegate [schemars::JsonSchema] of a type to its serde proxy "parameters" type
macro_rules! json_schema {
    ($parameters: ty, $is_referenceable: expr_2021) => {
        fn is_referenceable() -> bool {
            $is_referenceable
        }

        fn schema_name() -> String {
            <$parameters>::schema_name()
        }

        fn json_schema(
            generator: &mut schemars::r#gen::SchemaGenerator,
        ) -> schemars::schema::Schema {
            <$parameters>::json_schema(generator)
        }
    };
}

/// Static [crate::ChannelInfo] for channel kinds with a fixed number of output planes
macro_rules! lazy_info {
    (
        $name: ident,
        $t: ty,
        size: $size: expr_2021,
        names: [$($names: expr_2021),+ $(,)?],
        descriptions: [$($descriptions: expr_2021),+ $(,)?] $(,)?
    ) => {
        lazy_static! {
            static ref $name: ChannelInfo = ChannelInfo {
                size: $size,
                names: vec![$($names.to_owned()),+],
                descriptions: vec![$($descriptions.to_owned()),+],
            };
        }

        impl ChannelInfoTrait for $t {
            fn get_info(&self) -> &ChannelInfo {
                &$name
            }
        }
    };
}
