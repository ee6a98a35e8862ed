use polars::prelude::{all, col, lit, DataType, Expr, LazyFrame, NamedFrom, Series};
use std::collections::BTreeSet;

pub trait SolarFrameFilterExt {
    /// Keeps rows whose value in `region_column` is one of `regions`.
    /// Rows with a null region are dropped.
    ///
    /// # Arguments
    /// * `region_column`: Name of a column castable to `String`.
    /// * `regions`: Accepted labels, compared exactly.
    ///
    /// # Returns
    /// A new `LazyFrame` with the filter applied. A missing column only
    /// surfaces on `collect`.
    fn filter_regions(self, region_column: &str, regions: &BTreeSet<String>) -> LazyFrame;

    /// Drops rows where any of the `required` columns is null.
    ///
    /// NaN is not checked here: the normalizer already turns NaN into null.
    fn drop_incomplete(self, required: &[&str]) -> LazyFrame;

    /// Keeps rows 0, `stride`, 2·`stride`, … in their original order.
    /// A stride of 0 or 1 returns every row.
    fn stride_sample(self, stride: usize) -> LazyFrame;
}

impl SolarFrameFilterExt for LazyFrame {
    fn filter_regions(self, region_column: &str, regions: &BTreeSet<String>) -> LazyFrame {
        let accepted: Vec<&str> = regions.iter().map(String::as_str).collect();
        self.filter(
            col(region_column)
                .cast(DataType::String)
                .is_in(lit(Series::new("regions".into(), accepted))),
        )
    }

    fn drop_incomplete(self, required: &[&str]) -> LazyFrame {
        if required.is_empty() {
            return self;
        }
        let subset: Vec<Expr> = required.iter().map(|name| col(*name)).collect();
        self.drop_nulls(Some(subset))
    }

    fn stride_sample(self, stride: usize) -> LazyFrame {
        if stride <= 1 {
            return self;
        }
        self.select([all().gather_every(stride, 0)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    fn regions(labels: &[&str]) -> BTreeSet<String> {
        labels.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn test_filter_regions() -> PolarsResult<()> {
        let df = df!(
            "region" => [Some("Lomé"), Some("Kara"), None, Some("Lomé")],
            "ghi" => [1.0, 2.0, 3.0, 4.0]
        )?;

        let lome = df
            .clone()
            .lazy()
            .filter_regions("region", &regions(&["Lomé"]))
            .collect()?;
        assert_eq!(lome.column("ghi")?.f64()?.get(1), Some(4.0));
        assert_eq!(lome.height(), 2);

        let disjoint = df
            .lazy()
            .filter_regions("region", &regions(&["Bo"]))
            .collect()?;
        assert_eq!(disjoint.height(), 0);
        Ok(())
    }

    #[test]
    fn test_drop_incomplete() -> PolarsResult<()> {
        let df = df!(
            "date" => [Some("a"), None, Some("c"), Some("d")],
            "ghi" => [Some(1.0), Some(2.0), None, Some(4.0)],
            "extra" => [None::<f64>, None, None, None]
        )?;

        let clean = df.clone().lazy().drop_incomplete(&["date", "ghi"]).collect()?;
        assert_eq!(clean.height(), 2);
        assert_eq!(clean.column("ghi")?.f64()?.get(0), Some(1.0));
        assert_eq!(clean.column("ghi")?.f64()?.get(1), Some(4.0));

        assert_eq!(df.clone().lazy().drop_incomplete(&[]).collect()?.height(), 4);
        assert!(df.lazy().drop_incomplete(&["missing"]).collect().is_err());
        Ok(())
    }

    #[test]
    fn test_stride_sample_keeps_order() -> PolarsResult<()> {
        let df = df!(
            "idx" => (0..10i64).collect::<Vec<_>>(),
            "label" => (0..10).map(|i| format!("row{i}")).collect::<Vec<_>>()
        )?;

        let sampled = df.clone().lazy().stride_sample(3).collect()?;
        let kept: Vec<Option<i64>> = sampled.column("idx")?.i64()?.into_iter().collect();
        assert_eq!(kept, [Some(0), Some(3), Some(6), Some(9)]);
        assert_eq!(sampled.column("label")?.str()?.get(3), Some("row9"));

        assert_eq!(df.clone().lazy().stride_sample(1).collect()?.height(), 10);
        assert_eq!(df.lazy().stride_sample(0).collect()?.height(), 10);
        Ok(())
    }
}
