//! FILENAME: tests/common/mod.rs
//! Test harness and fixtures for dashboard integration tests.

#![allow(dead_code)]

use chrono::NaiveDate;
use crossfilter::ScaleParams;
use dashboard_lib::{Controller, DashboardFrame, RenderSink};
use dataset::{Dataset, Row};

/// Sink that keeps every presented frame.
#[derive(Default)]
pub struct RecordingSink {
    pub frames: Vec<DashboardFrame>,
}

impl RenderSink for RecordingSink {
    fn present(&mut self, frame: &DashboardFrame) {
        self.frames.push(frame.clone());
    }
}

impl RecordingSink {
    pub fn last(&self) -> &DashboardFrame {
        self.frames.last().expect("no frame presented")
    }
}

/// Sales fixture shaped like the stock superstore extract.
pub struct SalesFixture;

impl SalesFixture {
    /// (date, order, region, category, segment, product, sales, profit)
    pub fn data() -> Vec<((i32, u32, u32), &'static str, &'static str, &'static str, &'static str, &'static str, f64, f64)> {
        vec![
            ((2016, 11, 8), "CA-1", "Kentucky", "Furniture", "Consumer", "Bookcase", 261.96, 41.91),
            ((2016, 11, 8), "CA-1", "Kentucky", "Furniture", "Consumer", "Chair", 731.94, 219.58),
            ((2016, 6, 12), "CA-2", "California", "Office Supplies", "Corporate", "Labels", 14.62, 6.87),
            ((2015, 10, 11), "US-3", "Florida", "Furniture", "Consumer", "Table", 957.58, -383.03),
            ((2015, 10, 11), "US-3", "Florida", "Office Supplies", "Consumer", "Storage", 22.37, 2.52),
            ((2014, 6, 9), "CA-4", "California", "Technology", "Consumer", "Phone", 907.15, 90.72),
            ((2014, 6, 9), "CA-4", "California", "Office Supplies", "Consumer", "Binder", 18.50, 5.78),
            ((2017, 4, 15), "CA-5", "California", "Technology", "Home Office", "Phone", 114.90, 34.47),
            ((2017, 12, 5), "CA-6", "Texas", "Technology", "Corporate", "Printer", 371.17, 41.91),
            ((2017, 12, 5), "CA-6", "Texas", "Furniture", "Corporate", "Chair", 48.86, 14.17),
            ((2015, 3, 1), "CA-7", "Texas", "Office Supplies", "Home Office", "Binder", 7.28, 2.91),
            ((2014, 9, 17), "CA-8", "Kentucky", "Technology", "Home Office", "Printer", 1044.63, 240.26),
        ]
    }

    pub fn rows() -> Vec<Row> {
        Self::data()
            .into_iter()
            .map(|((y, m, d), order, region, category, segment, product, sales, profit)| {
                Row::new(
                    NaiveDate::from_ymd_opt(y, m, d).unwrap(),
                    region,
                    category,
                    segment,
                    product,
                    order,
                    sales,
                    profit,
                    1.0,
                )
            })
            .collect()
    }

    pub fn dataset() -> Dataset {
        Dataset::new(Self::rows())
    }

    /// The fixture as CSV text with the loader's expected headers.
    pub fn csv() -> String {
        let mut text = String::from("Row ID,Order ID,Order Date,Segment,State,Category,Product Name,Sales,Quantity,Profit\n");
        for (i, ((y, m, d), order, region, category, segment, product, sales, profit)) in
            Self::data().into_iter().enumerate()
        {
            text.push_str(&format!(
                "{},{},{}/{}/{},{},{},{},{},{},1,{}\n",
                i + 1, order, m, d, y, segment, region, category, product, sales, profit
            ));
        }
        text
    }
}

/// Test harness owning a dataset; controllers borrow from it.
pub struct TestHarness {
    pub dataset: Dataset,
}

impl TestHarness {
    pub fn new() -> Self {
        TestHarness {
            dataset: SalesFixture::dataset(),
        }
    }

    pub fn controller(&self) -> Controller<'_, RecordingSink> {
        let params = ScaleParams::from_dataset(&self.dataset);
        let mut controller = Controller::new(&self.dataset, params, RecordingSink::default());
        controller.start();
        controller
    }
}
