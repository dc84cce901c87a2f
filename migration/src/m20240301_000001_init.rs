use entity::{
    BandEntity, MusicianEntity, ReviewEntity, ShowBandEntity, ShowEntity, UserEntity, VenueEntity,
};
use sea_orm::Schema;
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let builder = manager.get_database_backend();
        let schema = Schema::new(builder);
        // parents first, foreign keys point backwards
        manager
            .exec_stmt(schema.create_table_from_entity(VenueEntity))
            .await?;
        manager
            .exec_stmt(schema.create_table_from_entity(BandEntity))
            .await?;
        manager
            .exec_stmt(schema.create_table_from_entity(UserEntity))
            .await?;
        manager
            .exec_stmt(schema.create_table_from_entity(ShowEntity))
            .await?;
        manager
            .exec_stmt(schema.create_table_from_entity(MusicianEntity))
            .await?;
        manager
            .exec_stmt(schema.create_table_from_entity(ShowBandEntity))
            .await?;
        manager
            .exec_stmt(schema.create_table_from_entity(ReviewEntity))
            .await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ReviewEntity).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ShowBandEntity).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(MusicianEntity).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ShowEntity).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(UserEntity).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(BandEntity).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(VenueEntity).to_owned())
            .await?;
        Ok(())
    }
}
