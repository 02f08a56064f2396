use sea_orm::{QueryOrder, TransactionTrait, prelude::*};

use crate::{EngineError, ResultEngine, people, planets, vehicles};

use super::{Engine, with_tx};

/// Generates the list, lookup and bulk import methods for a catalog table.
macro_rules! impl_catalog {
    ($list_fn:ident, $get_fn:ident, $import_fn:ident, $module:ident, $label:literal) => {
        #[doc = concat!("List every ", $label, " ordered by id.")]
        pub async fn $list_fn(&self) -> ResultEngine<Vec<$module::Model>> {
            $module::Entity::find()
                .order_by_asc($module::Column::Id)
                .all(&self.database)
                .await
                .map_err(Into::into)
        }

        #[doc = concat!("Fetch one ", $label, " by id.")]
        pub async fn $get_fn(&self, id: i32) -> ResultEngine<$module::Model> {
            $module::Entity::find_by_id(id)
                .one(&self.database)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound($label.to_string()))
        }

        /// Insert reference rows, keeping the ids they carry. All rows are
        /// written in one transaction.
        pub async fn $import_fn(&self, rows: Vec<$module::Model>) -> ResultEngine<usize> {
            let count = rows.len();
            with_tx!(self, |db_tx| {
                for row in rows {
                    $module::ActiveModel::from(row)
                        .reset_all()
                        .insert(&db_tx)
                        .await?;
                }
                Ok(count)
            })
        }
    };
}

impl Engine {
    impl_catalog!(list_people, person, import_people, people, "Person");
    impl_catalog!(list_planets, planet, import_planets, planets, "Planet");
    impl_catalog!(list_vehicles, vehicle, import_vehicles, vehicles, "Vehicle");
}
