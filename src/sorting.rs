use std::fmt;
use std::str::FromStr;

use crate::error::TopError;
use crate::metrics::MetricsRecord;
use crate::types::MeasuredResource;

/// Key a report is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Name,
    Resource(MeasuredResource),
}

impl FromStr for SortField {
    type Err = TopError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "name" {
            return Ok(SortField::Name);
        }
        match s.parse::<MeasuredResource>() {
            Ok(res) => Ok(SortField::Resource(res)),
            Err(TopError::UnknownResource(field)) => Err(TopError::UnsupportedSortField(field)),
            Err(other) => Err(other),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortField::Name => f.write_str("name"),
            SortField::Resource(r) => write!(f, "{}", r),
        }
    }
}

/// Ascending, stable order by `field`. Equal keys keep their input order.
pub fn sort_records<T: MetricsRecord>(records: &mut [T], field: SortField) {
    match field {
        SortField::Name => records.sort_by(|a, b| a.name().cmp(b.name())),
        SortField::Resource(res) => {
            records.sort_by(|a, b| a.resource_usage(res).cmp(&b.resource_usage(res)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{MetricsRecord, NodeRecord, ResourceUsage};
    use crate::parsing::Quantity;
    use chrono::{TimeZone, Utc};

    fn node(name: &str, cpu_milli: i64) -> NodeRecord {
        let mut usage = ResourceUsage::new();
        usage.insert("cpu".to_string(), Quantity::from_milli(cpu_milli));
        NodeRecord::new(name, usage, Utc.with_ymd_and_hms(2017, 1, 2, 15, 4, 5).unwrap())
    }

    fn names(records: &[NodeRecord]) -> Vec<&str> {
        records.iter().map(|r| r.name()).collect()
    }

    #[test]
    fn test_parse_sort_field() {
        assert_eq!("name".parse::<SortField>().unwrap(), SortField::Name);
        assert_eq!(
            "cpu".parse::<SortField>().unwrap(),
            SortField::Resource(MeasuredResource::Cpu)
        );
        assert_eq!(
            "memory".parse::<SortField>().unwrap(),
            SortField::Resource(MeasuredResource::Memory)
        );
        assert_eq!(
            "storage".parse::<SortField>().unwrap(),
            SortField::Resource(MeasuredResource::Storage)
        );

        for bad in ["", "Name", "CPU", "pods", "timestamp"] {
            let err = bad.parse::<SortField>().unwrap_err();
            assert!(matches!(err, TopError::UnsupportedSortField(ref f) if f == bad));
        }
    }

    #[test]
    fn test_sort_field_display_round_trips() {
        for field in ["name", "cpu", "memory", "storage"] {
            assert_eq!(field.parse::<SortField>().unwrap().to_string(), field);
        }
    }

    #[test]
    fn test_sort_by_name() {
        let mut records = vec![node("b", 0), node("a", 0), node("c", 0)];
        sort_records(&mut records, SortField::Name);
        assert_eq!(names(&records), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_sort_by_name_is_bytewise() {
        let mut records = vec![node("node-b", 0), node("Node-z", 0), node("node-a", 0)];
        sort_records(&mut records, SortField::Name);
        assert_eq!(names(&records), vec!["Node-z", "node-a", "node-b"]);
    }

    #[test]
    fn test_sort_by_cpu() {
        let mut records = vec![node("x", 300), node("y", 100), node("z", 200)];
        sort_records(&mut records, SortField::Resource(MeasuredResource::Cpu));
        let cpu: Vec<i64> = records
            .iter()
            .map(|r| r.resource_usage(MeasuredResource::Cpu).milli_value())
            .collect();
        assert_eq!(cpu, vec![100, 200, 300]);
    }

    #[test]
    fn test_sort_keeps_ties_in_input_order() {
        let mut records = vec![node("first", 100), node("zero", 0), node("second", 100)];
        sort_records(&mut records, SortField::Resource(MeasuredResource::Cpu));
        assert_eq!(names(&records), vec!["zero", "first", "second"]);

        // memory is absent everywhere, so every key is zero
        sort_records(&mut records, SortField::Resource(MeasuredResource::Memory));
        assert_eq!(names(&records), vec!["zero", "first", "second"]);
    }

    #[test]
    fn test_sort_empty_and_single() {
        let mut empty: Vec<NodeRecord> = Vec::new();
        sort_records(&mut empty, SortField::Name);
        assert!(empty.is_empty());

        let mut one = vec![node("only", 5)];
        sort_records(&mut one, SortField::Resource(MeasuredResource::Cpu));
        assert_eq!(names(&one), vec!["only"]);
    }
}
