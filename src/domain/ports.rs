use uuid::Uuid;

use super::errors::IntakeError;
use super::order::{CreatedOrder, MenuCatalogEntry, NewOrderRecord, PricedLine, TableRecord};

/// Everything the intake pipeline needs from the backing store.
///
/// The order insert and item insert are deliberately separate operations:
/// the pipeline performs a compensating delete of the order when the item
/// insert fails, and that seam is what the fault-injection tests exercise.
pub trait OrderRepository: Send + Sync + 'static {
    /// Authoritative catalog entries for the given item names. Names absent
    /// from the catalog are simply absent from the result.
    fn menu_entries(&self, names: &[String]) -> Result<Vec<MenuCatalogEntry>, IntakeError>;

    fn find_table(&self, table_number: i32) -> Result<Option<TableRecord>, IntakeError>;

    /// Resolve a customer by phone number, creating the record on first
    /// contact.
    fn find_or_create_customer(&self, phone: &str) -> Result<Uuid, IntakeError>;

    /// Insert the order row with a server-generated order number.
    fn insert_order(&self, record: &NewOrderRecord) -> Result<CreatedOrder, IntakeError>;

    fn insert_items(&self, order_id: Uuid, items: &[PricedLine]) -> Result<(), IntakeError>;

    /// Compensating delete for a partially persisted order.
    fn delete_order(&self, order_id: Uuid) -> Result<(), IntakeError>;
}
