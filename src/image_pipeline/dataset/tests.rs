use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::image_pipeline::common::error::LidxError;
use crate::image_pipeline::dataset::LabeledDataset;

#[test]
fn test_push_and_get() {
    let mut db = LabeledDataset::new(vec![2, 2]);
    db.push(3, vec![1, 2, 3, 4]).unwrap();
    db.push(7, vec![5, 6, 7, 8]).unwrap();

    assert_eq!(db.len(), 2);
    assert_eq!(db.record_len().unwrap(), 4);
    assert_eq!(db.get(0).unwrap().label(), 3);
    assert_eq!(db.get(1).unwrap().data(), &[5, 6, 7, 8]);
    assert_eq!(db.get(1).unwrap().at(1, 0, 2), Some(7));
}

#[test]
fn test_push_rejects_wrong_shape() {
    let mut db = LabeledDataset::new(vec![2, 2]);
    for len in [0, 3, 5, 16] {
        let result = db.push(0, vec![0; len]);
        assert!(matches!(
            result,
            Err(LidxError::ShapeError { expected: 4, actual }) if actual == len
        ));
    }
    assert!(db.is_empty());
}

#[test]
fn test_get_out_of_range() {
    let mut db = LabeledDataset::new(vec![1]);
    db.push(0, vec![9]).unwrap();
    assert!(matches!(db.get(1), Err(LidxError::IndexError { index: 1, len: 1 })));
}

#[test]
fn test_dim_access() {
    let db = LabeledDataset::new(vec![28, 14]);
    assert_eq!(db.dim(0).unwrap(), 28);
    assert_eq!(db.dim(1).unwrap(), 14);
    assert!(matches!(db.dim(2), Err(LidxError::IndexError { index: 2, len: 2 })));
}

#[test]
fn test_shuffle_preserves_records() {
    let mut db = LabeledDataset::new(vec![3]);
    for label in 0..20 {
        db.push(label, vec![label; 3]).unwrap();
    }
    let before = db.clone();

    db.shuffle(&mut StdRng::seed_from_u64(7));

    assert_eq!(db.len(), before.len());
    assert_ne!(db, before);
    assert!(db.iter().all(|r| r.len() == 3 && r.data()[0] == r.label()));
    assert_eq!(db.label_set(), before.label_set());
}

#[test]
fn test_label_set() {
    let mut db = LabeledDataset::new(vec![1]);
    for label in [4, 1, 4, 9, 1] {
        db.push(label, vec![0]).unwrap();
    }
    assert_eq!(db.label_set().into_iter().collect::<Vec<_>>(), vec![1, 4, 9]);
}

#[test]
fn test_push_rejects_negative_label() {
    let mut db = LabeledDataset::new(vec![2]);
    assert!(matches!(db.push(-1, vec![0, 0]), Err(LidxError::InvalidLabel(-1))));
    db.push(0, vec![0, 0]).unwrap();
    assert_eq!(db.len(), 1);
}

#[test]
fn test_record_len_overflow_is_an_error() {
    let mut db = LabeledDataset::new(vec![u16::MAX; 5]);
    assert!(matches!(db.record_len(), Err(LidxError::InvalidConfig(_))));
    assert!(matches!(db.push(0, vec![1]), Err(LidxError::InvalidConfig(_))));
    assert!(db.is_empty());
}
