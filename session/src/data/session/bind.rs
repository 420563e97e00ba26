//! Binding rendered plans into native `sqlx` queries

use sqlx::query::Query;
use sqlx::{Database, Encode, Type};

use super::plan::SqlParams;

/// Bind `params` to `sql` in order, yielding a query ready for the caller
/// to execute. Nothing is sent to the database here.
pub fn bind_params<'q, DB>(
    sql: &'q str,
    params: &'q SqlParams,
) -> Query<'q, DB, <DB as Database>::Arguments<'q>>
where
    DB: Database,
    &'q str: Encode<'q, DB> + Type<DB>,
{
    params
        .values
        .iter()
        .fold(sqlx::query::<DB>(sql), |query, value| {
            query.bind(value.as_str())
        })
}

#[cfg(test)]
mod tests {
    use sqlx::{Arguments, Execute, MySql, Postgres, Sqlite};

    use super::*;
    use crate::data::session::plan::{Predicate, QueryPlan};
    use crate::data::sql::{MysqlDialect, PostgresDialect, SqliteDialect};

    fn plan() -> QueryPlan {
        let mut plan = QueryPlan::new();
        plan.and(Predicate::Equals {
            column: "owner".to_string(),
            value: "org1".to_string(),
        })
        .and(Predicate::Contains {
            column: "name".to_string(),
            value: "ali".to_string(),
        });
        plan
    }

    #[test]
    fn binds_every_param_mysql() {
        let (sql, params) = plan().to_sql("user", &MysqlDialect);
        let mut query = bind_params::<MySql>(&sql, &params);
        assert_eq!(query.sql(), sql);

        let args = query.take_arguments().unwrap().unwrap();
        assert_eq!(args.len(), 2);
    }

    #[test]
    fn binds_every_param_postgres() {
        let (sql, params) = plan().to_sql("user", &PostgresDialect);
        let mut query = bind_params::<Postgres>(&sql, &params);
        assert!(query.sql().contains("owner = $1 AND name LIKE $2"));

        let args = query.take_arguments().unwrap().unwrap();
        assert_eq!(args.len(), 2);
    }

    #[test]
    fn no_params_sqlite() {
        let (sql, params) = QueryPlan::new().to_sql("user", &SqliteDialect);
        let query = bind_params::<Sqlite>(&sql, &params);
        assert_eq!(query.sql(), "SELECT * FROM user");
    }
}
