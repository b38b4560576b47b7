use std::cell::RefCell;

use crate::var::{AccessFault, AccessMode, Table};

fn two_entries() -> RefCell<Table> {
	RefCell::new([("a", 1_i64), ("b", 2_i64)].into_iter().collect())
}

#[test]
fn both_modes_read_quiescent_tables() {
	let table = two_entries();
	assert_eq!(AccessMode::Normal.read(&table, Table::len), Ok(2));
	assert_eq!(AccessMode::FaultTolerant.read(&table, Table::len), Ok(2));
}

#[test]
fn fault_tolerant_read_reports_busy_table() {
	let table = two_entries();
	let _writer = table.borrow_mut();

	assert_eq!(AccessMode::FaultTolerant.read(&table, Table::len), Err(AccessFault));
}

#[test]
fn guard_is_released_after_read() {
	let table = two_entries();
	AccessMode::FaultTolerant.read(&table, Table::len).expect("read succeeds");

	table.borrow_mut().insert("c", 3_i64);
	assert_eq!(table.borrow().len(), 3);
}

#[test]
#[should_panic]
fn normal_read_of_busy_table_panics() {
	let table = two_entries();
	let _writer = table.borrow_mut();

	let _ = AccessMode::Normal.read(&table, Table::len);
}
