//! Every bundled dataset parses and keeps the row order the searches rely on.

use vbelt_core::belts::{BeltModel, Profile};
use vbelt_core::tables::store::{self, Table};

fn numbers(table: &Table, column: &str) -> Vec<f64> {
    let col = table.column(column).unwrap();
    (0..table.len()).map(|row| table.number_at(row, col).unwrap()).collect()
}

fn texts<'a>(table: &'a Table, column: &str) -> Vec<&'a str> {
    let col = table.column(column).unwrap();
    (0..table.len()).map(|row| table.text_at(row, col).unwrap()).collect()
}

#[test]
fn all_datasets_load() {
    let names: Vec<_> = store::dataset_names().collect();
    assert_eq!(names.len(), 23);
    for name in names {
        let table = store::load(name).unwrap_or_else(|e| panic!("{}: {}", name, e));
        assert_eq!(table.name(), name);
        assert!(!table.is_empty(), "{} has no rows", name);
    }
}

#[test]
fn single_key_tables_ascend() {
    for name in ["fcac_contact_arc", "h_factor"] {
        let keys = numbers(store::load(name).unwrap(), "factor");
        assert_eq!(keys[0], 0.0, "{} must start at zero", name);
        assert!(keys.windows(2).all(|w| w[0] < w[1]), "{} keys not ascending", name);
    }
}

#[test]
fn basic_power_tables_ascend_within_each_diameter() {
    for profile in Profile::ALL {
        let table = store::load(&profile.basic_power_table()).unwrap();
        let diameters = numbers(table, "diameter");
        let rpms = numbers(table, "rpm");
        for i in 1..table.len() {
            let same_group = diameters[i] == diameters[i - 1];
            assert!(diameters[i] >= diameters[i - 1], "{} row {}", table.name(), i);
            if same_group {
                assert!(rpms[i] > rpms[i - 1], "{} row {}", table.name(), i);
            }
        }
        assert!(numbers(table, "power_b").iter().all(|&p| p > 0.0 && p <= 120.0));
    }
}

#[test]
fn additional_power_bands_are_contiguous() {
    for profile in Profile::ALL {
        let table = store::load(&profile.additional_power_table()).unwrap();
        let lows = numbers(table, "gr_low");
        let highs = numbers(table, "gr_high");
        let rpms = numbers(table, "rpm");
        assert_eq!(lows[0], 1.0);
        for i in 1..table.len() {
            if lows[i] == lows[i - 1] {
                assert_eq!(highs[i], highs[i - 1]);
                assert!(rpms[i] > rpms[i - 1], "{} row {}", table.name(), i);
            } else {
                assert_eq!(lows[i], highs[i - 1], "{} gap before row {}", table.name(), i);
            }
        }
    }
}

#[test]
fn length_tables_ascend_within_each_profile() {
    for model in BeltModel::ALL {
        let lengths_table = store::load(&model.length_table()).unwrap();
        let fcc_table = store::load(&model.length_correction_table()).unwrap();
        let profiles = texts(lengths_table, "profile");
        let lengths = numbers(lengths_table, "length");
        let types = texts(lengths_table, "type");
        let fcc_types = texts(fcc_table, "type");

        for profile in model.profiles() {
            let group: Vec<f64> = (0..lengths_table.len())
                .filter(|&i| profiles[i] == profile.code())
                .map(|i| lengths[i])
                .collect();
            assert!(!group.is_empty(), "no {} belts", profile);
            assert!(group.windows(2).all(|w| w[0] < w[1]), "{} lengths not ascending", profile);
        }
        for belt_type in types {
            assert!(fcc_types.contains(&belt_type), "{} has no length correction factor", belt_type);
        }
    }
}

#[test]
fn min_diameter_tables_ascend_in_power() {
    for model in BeltModel::ALL {
        let table = store::load(&model.min_diameter_table()).unwrap();
        let lows = numbers(table, "rpm_low");
        let powers = numbers(table, "power");
        for i in 1..table.len() {
            if lows[i] == lows[i - 1] {
                assert!(powers[i] > powers[i - 1], "{} row {}", table.name(), i);
            } else {
                assert!(lows[i] > lows[i - 1]);
            }
        }
    }
}
