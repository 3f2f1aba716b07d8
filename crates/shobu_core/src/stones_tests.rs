use super::*;

#[test]
fn test_from_cell() {
    assert_eq!(StoneSet::from_cell(0).0, 1);
    assert_eq!(StoneSet::from_cell(15).0, 1 << 15);
}

#[test]
fn test_len_and_center() {
    assert_eq!(StoneSet::EMPTY.len(), 0);
    assert_eq!(StoneSet::CENTER.len(), 4);
    assert!(StoneSet::CENTER.contains(5));
    assert!(StoneSet::CENTER.contains(10));
    assert!(!StoneSet::CENTER.contains(0));
}

#[test]
fn test_iterator() {
    let set = StoneSet(0b1010);
    let cells: Vec<u8> = set.collect();
    assert_eq!(cells, vec![1, 3]);
}

#[test]
fn test_from_cells_rejects_out_of_range() {
    assert!(StoneSet::from_cells([0, 15]).is_ok());
    assert!(matches!(
        StoneSet::from_cells([3, 16]),
        Err(AgentError::InvalidState(_))
    ));
}

#[test]
fn test_insert_remove() {
    let mut set = StoneSet::EMPTY;
    set.insert(7);
    assert!(set.contains(7));
    set.remove(7);
    assert!(set.is_empty());
    assert!(!set.contains(200));
}
