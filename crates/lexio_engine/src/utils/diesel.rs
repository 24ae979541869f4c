//! Generic utilities for working with diesel.

pub use crate::{diesel_struct, eq, query};
use std::slice::Chunks;

pub const PG_MAX_PARAMS: usize = 65535;

#[macro_export]
macro_rules! diesel_struct {
    (
        $(#[ $attr:meta ])*
        $t:ident {
            $($field:ident: $field_t:ty = $diesel_t:tt),* $(,)?
        }
    ) => {
        $(#[ $attr ])*
        #[derive(Debug, ::diesel::AsExpression, ::diesel::FromSqlRow)]
        #[diesel(sql_type = $crate::schema::sql_types::$t)]
        pub struct $t {
            $(pub $field: $field_t),*
        }

        impl ::diesel::serialize::ToSql<$crate::schema::sql_types::$t, ::diesel::pg::Pg> for $t {
            fn to_sql<'b>(
                    &'b self,
                    out: &mut ::diesel::serialize::Output<'b, '_, ::diesel::pg::Pg>
                ) -> ::diesel::serialize::Result {
                // clones so the macro works for non-Copy fields like String
                ::diesel::serialize::WriteTuple::<($(::diesel::sql_types::$diesel_t),*)>::write_tuple(
                    &($(self.$field.clone()),*),
                    out,
                )
            }
        }

        impl ::diesel::query_builder::QueryId for $crate::schema::sql_types::$t {
            type QueryId = $t;

            const HAS_STATIC_QUERY_ID: bool = true;
        }

        impl ::diesel::deserialize::FromSql<$crate::schema::sql_types::$t, ::diesel::pg::Pg> for $t {
            fn from_sql(
                bytes: <::diesel::pg::Pg as ::diesel::backend::Backend>::RawValue<'_>
            ) -> ::diesel::deserialize::Result<Self> {
                // the record type is spelled out because fields like String
                // deserialize from more than one sql type
                let ($($field),*) = <($($field_t),*) as ::diesel::deserialize::FromSql<
                    ::diesel::sql_types::Record<($(::diesel::sql_types::$diesel_t),*)>,
                    ::diesel::pg::Pg,
                >>::from_sql(bytes)?;
                Ok(Self {
                    $($field),*
                })
            }
        }
    };
}

/// Helper macro for making queries.
///
/// eq!(table, column_1, column_2)
/// =
/// (table::column_1.eq(column_1), table::column_2.eq(column_2))
///
/// eq!(table_1::column_1, table_2::column_2)
/// =
/// (table_1::column_1.eq(column_1), table_2::column_2.eq(column_2))
#[macro_export]
macro_rules! eq {
    ($t:ident, $c: ident $(,)?) => {
        $t::$c.eq($c)
    };
    ($t:ident, $($c: ident),* $(,)?) => {
        ( $($t::$c.eq($c)),* )
    };
    ($t:ident :: $c: ident) => {
        $t::$c.eq($c)
    };
    ($($t:ident :: $c: ident),* $(,)?) => {
        ( $($t::$c.eq($c)),* )
    };
}

/// Helper macro for implementing Queryable and Selectable and ensures the implementations match.
///
/// ```ignore
/// query! {
///     pub struct Book {
///         pub id: i32 = books::id,
///         pub title: String = books::title,
///         pub total_words: i32 = books::total_words,
///         pub is_finished: bool = books::is_finished,
///     }
/// }
/// ```
#[macro_export]
macro_rules! query {
    (
        $(#[ $attr:meta ])*
        $v:vis $kw:ident $name:ident {
            $(
                $fv:vis $field:ident: $t:ty = $table:ident :: $column:ident
            ),* $(,)?
        }
    ) => {
        $(#[ $attr ])*
        #[derive(::diesel::Queryable)]
        #[diesel(check_for_backend(::diesel::pg::Pg))]
        $v $kw $name {
            $($fv $field: $t),*
        }

        impl<DB: ::diesel::backend::Backend> ::diesel::Selectable<DB> for $name {
            type SelectExpression = ($( $crate::schema::$table::$column, )*);

            fn construct_selection() -> Self::SelectExpression {
                ($( $crate::schema::$table::$column, )*)
            }
        }
    };
}

pub trait PostgresChunks<T> {
    fn pg_chunks(&self) -> Chunks<'_, T>;
}

macro_rules! impl_postgres_chunks {
    (
        $lit:literal, $($ty:ident),*
    ) => {
        impl<$($ty),*,> PostgresChunks<($($ty),*,)> for Vec<($($ty),*,)> {
            fn pg_chunks(&self) -> Chunks<'_, ($($ty),*,)> {
                self.chunks(PG_MAX_PARAMS / $lit)
            }
        }
    };
}

impl_postgres_chunks!(2, A, B);
impl_postgres_chunks!(3, A, B, C);
impl_postgres_chunks!(4, A, B, C, D);
impl_postgres_chunks!(5, A, B, C, D, E);
impl_postgres_chunks!(6, A, B, C, D, E, F);
impl_postgres_chunks!(7, A, B, C, D, E, F, G);
impl_postgres_chunks!(8, A, B, C, D, E, F, G, H);
