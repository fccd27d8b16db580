//! Initial schema: master data, movement and ledger logs, purchase and
//! payment documents, named counters.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Units::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Units::Id).uuid().primary_key().not_null())
                    .col(ColumnDef::new(Units::Code).string().not_null())
                    .col(ColumnDef::new(Units::Name).string().not_null())
                    .col(ColumnDef::new(Units::Category).string().not_null())
                    .col(ColumnDef::new(Units::IsBase).boolean().not_null())
                    .col(
                        ColumnDef::new(Units::ConversionFactor)
                            .decimal_len(16, 6)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Units::BaseUnitId).uuid().null())
                    .col(
                        ColumnDef::new(Units::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Units::CreatedAt).timestamp_with_time_zone().not_null())
                    .col(ColumnDef::new(Units::UpdatedAt).timestamp_with_time_zone().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_units_code")
                    .table(Units::Table)
                    .col(Units::Code)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Materials::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Materials::Id).uuid().primary_key().not_null())
                    .col(ColumnDef::new(Materials::Code).string().not_null())
                    .col(ColumnDef::new(Materials::Name).string().not_null())
                    .col(ColumnDef::new(Materials::Category).string().null())
                    .col(ColumnDef::new(Materials::BaseUnitId).uuid().not_null())
                    .col(
                        ColumnDef::new(Materials::CurrentStock)
                            .decimal_len(16, 6)
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Materials::MinimumStock)
                            .decimal_len(16, 6)
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Materials::LastPurchasePrice)
                            .decimal_len(16, 4)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Materials::LastPurchaseDate)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Materials::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Materials::CreatedAt).timestamp_with_time_zone().not_null())
                    .col(ColumnDef::new(Materials::UpdatedAt).timestamp_with_time_zone().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_materials_base_unit")
                            .from(Materials::Table, Materials::BaseUnitId)
                            .to(Units::Table, Units::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_materials_code")
                    .table(Materials::Table)
                    .col(Materials::Code)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(MaterialUnits::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MaterialUnits::Id)
                            .uuid()
                            .primary_key()
                            .not_null(),
                    )
                    .col(ColumnDef::new(MaterialUnits::MaterialId).uuid().not_null())
                    .col(ColumnDef::new(MaterialUnits::UnitId).uuid().not_null())
                    .col(
                        ColumnDef::new(MaterialUnits::ConversionFactor)
                            .decimal_len(16, 6)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MaterialUnits::IsDefaultPurchase)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(MaterialUnits::IsDefaultIssue)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(MaterialUnits::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_material_units_material")
                            .from(MaterialUnits::Table, MaterialUnits::MaterialId)
                            .to(Materials::Table, Materials::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_material_units_unit")
                            .from(MaterialUnits::Table, MaterialUnits::UnitId)
                            .to(Units::Table, Units::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_material_units_material_unit")
                    .table(MaterialUnits::Table)
                    .col(MaterialUnits::MaterialId)
                    .col(MaterialUnits::UnitId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Suppliers::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Suppliers::Id).uuid().primary_key().not_null())
                    .col(ColumnDef::new(Suppliers::Code).string().not_null())
                    .col(ColumnDef::new(Suppliers::Name).string().not_null())
                    .col(ColumnDef::new(Suppliers::ContactPerson).string().null())
                    .col(ColumnDef::new(Suppliers::Phone).string().null())
                    .col(ColumnDef::new(Suppliers::Address).string().null())
                    .col(
                        ColumnDef::new(Suppliers::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Suppliers::CreatedAt).timestamp_with_time_zone().not_null())
                    .col(ColumnDef::new(Suppliers::UpdatedAt).timestamp_with_time_zone().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_suppliers_code")
                    .table(Suppliers::Table)
                    .col(Suppliers::Code)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Clients::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Clients::Id).uuid().primary_key().not_null())
                    .col(ColumnDef::new(Clients::Code).string().not_null())
                    .col(ColumnDef::new(Clients::Name).string().not_null())
                    .col(ColumnDef::new(Clients::ContactPerson).string().null())
                    .col(ColumnDef::new(Clients::Phone).string().null())
                    .col(ColumnDef::new(Clients::Address).string().null())
                    .col(
                        ColumnDef::new(Clients::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Clients::CreatedAt).timestamp_with_time_zone().not_null())
                    .col(ColumnDef::new(Clients::UpdatedAt).timestamp_with_time_zone().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_clients_code")
                    .table(Clients::Table)
                    .col(Clients::Code)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Projects::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Projects::Id).uuid().primary_key().not_null())
                    .col(ColumnDef::new(Projects::ClientId).uuid().not_null())
                    .col(ColumnDef::new(Projects::Name).string().not_null())
                    .col(ColumnDef::new(Projects::Location).string().null())
                    .col(
                        ColumnDef::new(Projects::ContractAmount)
                            .decimal_len(16, 4)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Projects::TotalPaid)
                            .decimal_len(16, 4)
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Projects::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Projects::CreatedAt).timestamp_with_time_zone().not_null())
                    .col(ColumnDef::new(Projects::UpdatedAt).timestamp_with_time_zone().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_projects_client")
                            .from(Projects::Table, Projects::ClientId)
                            .to(Clients::Table, Clients::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(StockMovements::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StockMovements::Id)
                            .uuid()
                            .primary_key()
                            .not_null(),
                    )
                    .col(ColumnDef::new(StockMovements::Sequence).big_integer().not_null())
                    .col(ColumnDef::new(StockMovements::MaterialId).uuid().not_null())
                    .col(ColumnDef::new(StockMovements::MovementType).string().not_null())
                    .col(
                        ColumnDef::new(StockMovements::Quantity)
                            .decimal_len(16, 6)
                            .not_null(),
                    )
                    .col(ColumnDef::new(StockMovements::UnitId).uuid().not_null())
                    .col(
                        ColumnDef::new(StockMovements::BaseQuantity)
                            .decimal_len(16, 6)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StockMovements::BalanceAfter)
                            .decimal_len(16, 6)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StockMovements::UnitPrice)
                            .decimal_len(16, 4)
                            .null(),
                    )
                    .col(ColumnDef::new(StockMovements::ProjectId).uuid().null())
                    .col(ColumnDef::new(StockMovements::ReferenceType).string().null())
                    .col(ColumnDef::new(StockMovements::ReferenceId).uuid().null())
                    .col(ColumnDef::new(StockMovements::Notes).text().null())
                    .col(ColumnDef::new(StockMovements::CreatedBy).uuid().null())
                    .col(
                        ColumnDef::new(StockMovements::MovementDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StockMovements::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_stock_movements_material")
                            .from(StockMovements::Table, StockMovements::MaterialId)
                            .to(Materials::Table, Materials::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_stock_movements_unit")
                            .from(StockMovements::Table, StockMovements::UnitId)
                            .to(Units::Table, Units::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_stock_movements_sequence")
                    .table(StockMovements::Table)
                    .col(StockMovements::Sequence)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_stock_movements_material_date")
                    .table(StockMovements::Table)
                    .col(StockMovements::MaterialId)
                    .col(StockMovements::MovementDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SupplierTransactions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SupplierTransactions::Id)
                            .uuid()
                            .primary_key()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SupplierTransactions::Sequence)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(SupplierTransactions::SupplierId).uuid().not_null())
                    .col(ColumnDef::new(SupplierTransactions::EntryKind).string().not_null())
                    .col(
                        ColumnDef::new(SupplierTransactions::Debit)
                            .decimal_len(16, 4)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SupplierTransactions::Credit)
                            .decimal_len(16, 4)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SupplierTransactions::Discount)
                            .decimal_len(16, 4)
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(SupplierTransactions::BalanceAfter)
                            .decimal_len(16, 4)
                            .not_null(),
                    )
                    .col(ColumnDef::new(SupplierTransactions::ReferenceType).string().null())
                    .col(ColumnDef::new(SupplierTransactions::ReferenceId).uuid().null())
                    .col(ColumnDef::new(SupplierTransactions::Description).text().null())
                    .col(ColumnDef::new(SupplierTransactions::CreatedBy).uuid().null())
                    .col(
                        ColumnDef::new(SupplierTransactions::TransactionDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SupplierTransactions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_supplier_transactions_supplier")
                            .from(SupplierTransactions::Table, SupplierTransactions::SupplierId)
                            .to(Suppliers::Table, Suppliers::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_supplier_transactions_sequence")
                    .table(SupplierTransactions::Table)
                    .col(SupplierTransactions::Sequence)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_supplier_transactions_supplier_date")
                    .table(SupplierTransactions::Table)
                    .col(SupplierTransactions::SupplierId)
                    .col(SupplierTransactions::TransactionDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ClientTransactions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ClientTransactions::Id)
                            .uuid()
                            .primary_key()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ClientTransactions::Sequence)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ClientTransactions::ClientId).uuid().not_null())
                    .col(ColumnDef::new(ClientTransactions::ProjectId).uuid().not_null())
                    .col(ColumnDef::new(ClientTransactions::EntryKind).string().not_null())
                    .col(
                        ColumnDef::new(ClientTransactions::Debit)
                            .decimal_len(16, 4)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ClientTransactions::Credit)
                            .decimal_len(16, 4)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ClientTransactions::Discount)
                            .decimal_len(16, 4)
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(ClientTransactions::BalanceAfter)
                            .decimal_len(16, 4)
                            .not_null(),
                    )
                    .col(ColumnDef::new(ClientTransactions::ReferenceType).string().null())
                    .col(ColumnDef::new(ClientTransactions::ReferenceId).uuid().null())
                    .col(ColumnDef::new(ClientTransactions::Description).text().null())
                    .col(ColumnDef::new(ClientTransactions::CreatedBy).uuid().null())
                    .col(
                        ColumnDef::new(ClientTransactions::TransactionDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ClientTransactions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_client_transactions_client")
                            .from(ClientTransactions::Table, ClientTransactions::ClientId)
                            .to(Clients::Table, Clients::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_client_transactions_project")
                            .from(ClientTransactions::Table, ClientTransactions::ProjectId)
                            .to(Projects::Table, Projects::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_client_transactions_sequence")
                    .table(ClientTransactions::Table)
                    .col(ClientTransactions::Sequence)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_client_transactions_scope_date")
                    .table(ClientTransactions::Table)
                    .col(ClientTransactions::ClientId)
                    .col(ClientTransactions::ProjectId)
                    .col(ClientTransactions::TransactionDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PurchaseInvoices::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PurchaseInvoices::Id)
                            .uuid()
                            .primary_key()
                            .not_null(),
                    )
                    .col(ColumnDef::new(PurchaseInvoices::InvoiceNumber).string().not_null())
                    .col(ColumnDef::new(PurchaseInvoices::SupplierId).uuid().not_null())
                    .col(
                        ColumnDef::new(PurchaseInvoices::TotalAmount)
                            .decimal_len(16, 4)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PurchaseInvoices::PaidAmount)
                            .decimal_len(16, 4)
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(PurchaseInvoices::Status).string().not_null())
                    .col(ColumnDef::new(PurchaseInvoices::Notes).text().null())
                    .col(ColumnDef::new(PurchaseInvoices::CreatedBy).uuid().null())
                    .col(
                        ColumnDef::new(PurchaseInvoices::InvoiceDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PurchaseInvoices::DueDate)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(PurchaseInvoices::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PurchaseInvoices::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_purchase_invoices_supplier")
                            .from(PurchaseInvoices::Table, PurchaseInvoices::SupplierId)
                            .to(Suppliers::Table, Suppliers::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_purchase_invoices_number")
                    .table(PurchaseInvoices::Table)
                    .col(PurchaseInvoices::InvoiceNumber)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_purchase_invoices_supplier_status")
                    .table(PurchaseInvoices::Table)
                    .col(PurchaseInvoices::SupplierId)
                    .col(PurchaseInvoices::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PurchaseInvoiceLines::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PurchaseInvoiceLines::Id)
                            .uuid()
                            .primary_key()
                            .not_null(),
                    )
                    .col(ColumnDef::new(PurchaseInvoiceLines::InvoiceId).uuid().not_null())
                    .col(ColumnDef::new(PurchaseInvoiceLines::MaterialId).uuid().not_null())
                    .col(ColumnDef::new(PurchaseInvoiceLines::UnitId).uuid().not_null())
                    .col(
                        ColumnDef::new(PurchaseInvoiceLines::Quantity)
                            .decimal_len(16, 6)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PurchaseInvoiceLines::BaseQuantity)
                            .decimal_len(16, 6)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PurchaseInvoiceLines::UnitPrice)
                            .decimal_len(16, 4)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PurchaseInvoiceLines::LineTotal)
                            .decimal_len(16, 4)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PurchaseInvoiceLines::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_purchase_invoice_lines_invoice")
                            .from(PurchaseInvoiceLines::Table, PurchaseInvoiceLines::InvoiceId)
                            .to(PurchaseInvoices::Table, PurchaseInvoices::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SupplierPayments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SupplierPayments::Id)
                            .uuid()
                            .primary_key()
                            .not_null(),
                    )
                    .col(ColumnDef::new(SupplierPayments::PaymentNumber).string().not_null())
                    .col(ColumnDef::new(SupplierPayments::SupplierId).uuid().not_null())
                    .col(ColumnDef::new(SupplierPayments::Kind).string().not_null())
                    .col(
                        ColumnDef::new(SupplierPayments::Amount)
                            .decimal_len(16, 4)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SupplierPayments::Discount)
                            .decimal_len(16, 4)
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(SupplierPayments::Notes).text().null())
                    .col(ColumnDef::new(SupplierPayments::CreatedBy).uuid().null())
                    .col(
                        ColumnDef::new(SupplierPayments::PaymentDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SupplierPayments::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_supplier_payments_supplier")
                            .from(SupplierPayments::Table, SupplierPayments::SupplierId)
                            .to(Suppliers::Table, Suppliers::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_supplier_payments_number")
                    .table(SupplierPayments::Table)
                    .col(SupplierPayments::PaymentNumber)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ClientPayments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ClientPayments::Id)
                            .uuid()
                            .primary_key()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ClientPayments::PaymentNumber).string().not_null())
                    .col(ColumnDef::new(ClientPayments::ClientId).uuid().not_null())
                    .col(ColumnDef::new(ClientPayments::ProjectId).uuid().not_null())
                    .col(
                        ColumnDef::new(ClientPayments::ContractAmount)
                            .decimal_len(16, 4)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ClientPayments::AdditionalAmount)
                            .decimal_len(16, 4)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ClientPayments::TotalAmount)
                            .decimal_len(16, 4)
                            .not_null(),
                    )
                    .col(ColumnDef::new(ClientPayments::Notes).text().null())
                    .col(ColumnDef::new(ClientPayments::CreatedBy).uuid().null())
                    .col(
                        ColumnDef::new(ClientPayments::PaymentDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ClientPayments::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_client_payments_client")
                            .from(ClientPayments::Table, ClientPayments::ClientId)
                            .to(Clients::Table, Clients::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_client_payments_project")
                            .from(ClientPayments::Table, ClientPayments::ProjectId)
                            .to(Projects::Table, Projects::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_client_payments_number")
                    .table(ClientPayments::Table)
                    .col(ClientPayments::PaymentNumber)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Counters::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Counters::Name)
                            .string()
                            .primary_key()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Counters::Value).big_integer().not_null())
                    .col(
                        ColumnDef::new(Counters::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for table in [
            Table::drop().table(Counters::Table).to_owned(),
            Table::drop().table(ClientPayments::Table).to_owned(),
            Table::drop().table(SupplierPayments::Table).to_owned(),
            Table::drop().table(PurchaseInvoiceLines::Table).to_owned(),
            Table::drop().table(PurchaseInvoices::Table).to_owned(),
            Table::drop().table(ClientTransactions::Table).to_owned(),
            Table::drop().table(SupplierTransactions::Table).to_owned(),
            Table::drop().table(StockMovements::Table).to_owned(),
            Table::drop().table(Projects::Table).to_owned(),
            Table::drop().table(Clients::Table).to_owned(),
            Table::drop().table(Suppliers::Table).to_owned(),
            Table::drop().table(MaterialUnits::Table).to_owned(),
            Table::drop().table(Materials::Table).to_owned(),
            Table::drop().table(Units::Table).to_owned(),
        ] {
            manager.drop_table(table).await?;
        }
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Units {
    Table,
    Id,
    Code,
    Name,
    Category,
    IsBase,
    ConversionFactor,
    BaseUnitId,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Materials {
    Table,
    Id,
    Code,
    Name,
    Category,
    BaseUnitId,
    CurrentStock,
    MinimumStock,
    LastPurchasePrice,
    LastPurchaseDate,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum MaterialUnits {
    Table,
    Id,
    MaterialId,
    UnitId,
    ConversionFactor,
    IsDefaultPurchase,
    IsDefaultIssue,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Suppliers {
    Table,
    Id,
    Code,
    Name,
    ContactPerson,
    Phone,
    Address,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Clients {
    Table,
    Id,
    Code,
    Name,
    ContactPerson,
    Phone,
    Address,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Projects {
    Table,
    Id,
    ClientId,
    Name,
    Location,
    ContractAmount,
    TotalPaid,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum StockMovements {
    Table,
    Id,
    Sequence,
    MaterialId,
    MovementType,
    Quantity,
    UnitId,
    BaseQuantity,
    BalanceAfter,
    UnitPrice,
    ProjectId,
    ReferenceType,
    ReferenceId,
    Notes,
    CreatedBy,
    MovementDate,
    CreatedAt,
}

#[derive(DeriveIden)]
enum SupplierTransactions {
    Table,
    Id,
    Sequence,
    SupplierId,
    EntryKind,
    Debit,
    Credit,
    Discount,
    BalanceAfter,
    ReferenceType,
    ReferenceId,
    Description,
    CreatedBy,
    TransactionDate,
    CreatedAt,
}

#[derive(DeriveIden)]
enum ClientTransactions {
    Table,
    Id,
    Sequence,
    ClientId,
    ProjectId,
    EntryKind,
    Debit,
    Credit,
    Discount,
    BalanceAfter,
    ReferenceType,
    ReferenceId,
    Description,
    CreatedBy,
    TransactionDate,
    CreatedAt,
}

#[derive(DeriveIden)]
enum PurchaseInvoices {
    Table,
    Id,
    InvoiceNumber,
    SupplierId,
    TotalAmount,
    PaidAmount,
    Status,
    Notes,
    CreatedBy,
    InvoiceDate,
    DueDate,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum PurchaseInvoiceLines {
    Table,
    Id,
    InvoiceId,
    MaterialId,
    UnitId,
    Quantity,
    BaseQuantity,
    UnitPrice,
    LineTotal,
    CreatedAt,
}

#[derive(DeriveIden)]
enum SupplierPayments {
    Table,
    Id,
    PaymentNumber,
    SupplierId,
    Kind,
    Amount,
    Discount,
    Notes,
    CreatedBy,
    PaymentDate,
    CreatedAt,
}

#[derive(DeriveIden)]
enum ClientPayments {
    Table,
    Id,
    PaymentNumber,
    ClientId,
    ProjectId,
    ContractAmount,
    AdditionalAmount,
    TotalAmount,
    Notes,
    CreatedBy,
    PaymentDate,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Counters {
    Table,
    Name,
    Value,
    UpdatedAt,
}
