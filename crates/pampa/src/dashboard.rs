//! Dashboard page assembly.
//!
//! A [`Dashboard`] owns the session [`WorkbookStore`] and builds page
//! view-models from a user [`Predicate`]: narrow the cached tables,
//! aggregate, compute KPIs, emit chart specs and widgets. Every page is
//! recomputed from scratch on each call; the only state is the cache of
//! loaded sheets.

use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use pampa_analytics::{
    GroupOrder, Predicate, column, correlation_matrix, distinct_values, filter, grouped_sum,
    grouped_sum_multi, stats,
};
use pampa_data::schema::{self, columns};
use pampa_data::WorkbookStore;
use pampa_kpi::{KeyedValue, growth_pct, share_pct};
use pampa_output::{Cell, ChartKind, ChartSeries, ChartSpec, Metric, ReportTable};

use crate::error::Result;
use crate::view::{FilterOptions, PageView};

/// Tunables for page assembly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Bin count for the accesses histogram (default: 50)
    pub histogram_bins: usize,
    /// Annual growth target used by the projection KPI (default: 0.10)
    pub target_rate: f64,
    /// Technology label whose share-of-total the KPI page reports
    pub fiber_technology: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            histogram_bins: 50,
            target_rate: 0.10,
            fiber_technology: "Fibra optica".to_string(),
        }
    }
}

/// The dashboard core: cached tables plus page builders.
#[derive(Debug)]
pub struct Dashboard {
    store: WorkbookStore,
    config: DashboardConfig,
}

impl Dashboard {
    /// Open the workbook at `path` with the default configuration.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self {
            store: WorkbookStore::open(path)?,
            config: DashboardConfig::default(),
        })
    }

    /// Open with an explicit configuration.
    pub fn open_with_config(path: impl AsRef<Path>, config: DashboardConfig) -> Result<Self> {
        Ok(Self {
            store: WorkbookStore::open(path)?,
            config,
        })
    }

    /// Configuration in effect.
    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Distinct filter choices present in the access table.
    pub fn filter_options(&self) -> Result<FilterOptions> {
        let df = self.store.sheet(&schema::TECHNOLOGY_ACCESSES)?;
        Ok(FilterOptions {
            provinces: distinct_values(&df, columns::PROVINCE)?,
            technologies: distinct_values(&df, columns::TECHNOLOGY)?,
            years: distinct_values(&df, columns::YEAR)?,
        })
    }

    /// The main page: headline metrics plus the full chart set over the
    /// filtered access table.
    pub fn overview(&self, predicate: &Predicate) -> Result<PageView> {
        let df = self.store.sheet(&schema::TECHNOLOGY_ACCESSES)?;
        let filtered = filter(&df, predicate)?;
        debug!(rows = filtered.height(), "overview subset");

        let mut page = PageView::new("Dashboard de Accesos a Internet");

        let accesses = column::numeric_values(&filtered, columns::ACCESSES)?;
        let speeds = column::numeric_values(&filtered, columns::SPEED)?;
        page.metrics.push(Metric::with_unit(
            "Total de Accesos",
            stats::sum(&accesses),
            "accesos",
        ));
        page.metrics.push(Metric::with_unit(
            "Velocidad Media",
            stats::mean(&speeds),
            "Mbps",
        ));
        page.metrics.push(Metric::with_unit(
            "Desvio Estandar de Accesos",
            stats::std_dev(&accesses),
            "accesos",
        ));

        page.charts.push(self.technology_chart(&filtered)?);
        page.charts.push(self.histogram_chart(&accesses));
        page.charts.push(self.box_chart(&accesses));
        page.charts.push(self.correlation_chart(&filtered)?);
        page.charts.push(self.scatter_chart(&filtered)?);
        page.charts.push(self.trend_chart(&filtered)?);

        page.tables.push(self.outlier_table(&filtered)?);

        Ok(page)
    }

    /// Table of access rows falling outside the Tukey fences of the
    /// filtered access table. The same table the overview page embeds,
    /// exposed on its own for the `outliers` CLI command.
    pub fn outliers(&self, predicate: &Predicate) -> Result<ReportTable> {
        let df = self.store.sheet(&schema::TECHNOLOGY_ACCESSES)?;
        let filtered = filter(&df, predicate)?;
        self.outlier_table(&filtered)
    }

    /// The KPI page: growth, share and projection targets computed over
    /// the latest periods present in the filtered data.
    pub fn kpis(&self, predicate: &Predicate) -> Result<PageView> {
        let df = self.store.sheet(&schema::TECHNOLOGY_ACCESSES)?;
        let filtered = filter(&df, predicate)?;
        debug!(rows = filtered.height(), "kpi subset");

        let mut page = PageView::new("KPIs de Conectividad");

        let periods = distinct_periods(&filtered)?;
        let Some(&latest) = periods.last() else {
            // Nothing matched: every KPI is undefined, the page survives
            page.metrics.push(Metric::with_unit("Crecimiento QoQ", None, "%"));
            page.metrics.push(Metric::with_unit("Crecimiento YoY", None, "%"));
            page.metrics
                .push(Metric::with_unit("Participacion Fibra", None, "%"));
            page.metrics
                .push(Metric::with_unit("Desvio vs Proyeccion", None, "%"));
            return Ok(page);
        };

        let latest_df = period_slice(&filtered, latest)?;
        let latest_totals = province_sums(&latest_df, columns::ACCESSES)?;

        // Quarter over quarter: the period right before the latest one
        let qoq_prev = periods.len().checked_sub(2).map(|i| periods[i]);
        let (qoq_metric, qoq_table) =
            self.growth_widgets("Crecimiento Trimestral por Provincia", &filtered, qoq_prev, &latest_totals)?;
        page.metrics
            .push(Metric::with_unit("Crecimiento QoQ", qoq_metric, "%"));
        if let Some(table) = qoq_table {
            page.tables.push(table);
        }

        // Year over year: same quarter, previous year
        let yoy_period = (latest.0 - 1, latest.1);
        let yoy_prev = periods.contains(&yoy_period).then_some(yoy_period);
        let (yoy_metric, yoy_table) =
            self.growth_widgets("Crecimiento Interanual por Provincia", &filtered, yoy_prev, &latest_totals)?;
        page.metrics
            .push(Metric::with_unit("Crecimiento YoY", yoy_metric, "%"));
        if let Some(table) = yoy_table {
            page.tables.push(table);
        }

        // Fiber share of total accesses, latest period
        let fiber_predicate =
            Predicate::new().with_text(columns::TECHNOLOGY, [self.config.fiber_technology.clone()]);
        let fiber_df = filter(&latest_df, &fiber_predicate)?;
        let fiber_totals = province_sums(&fiber_df, columns::ACCESSES)?;

        // Every province of the period appears, at zero fiber if need be
        let fiber_by_province: Vec<KeyedValue> = latest_totals
            .iter()
            .map(|(key, _)| {
                let fiber = fiber_totals
                    .iter()
                    .find(|(fk, _)| fk == key)
                    .map_or(0.0, |(_, v)| *v);
                (key.clone(), fiber)
            })
            .collect();
        let shares = pampa_kpi::share(&fiber_by_province, &latest_totals);
        let mut share_table =
            ReportTable::new("Participacion de Fibra Optica", ["Provincia", "Fibra", "Total", "Participacion %"]);
        for record in &shares {
            share_table.push_row([
                Cell::from(record.key.as_str()),
                Cell::from(record.numerator),
                Cell::from(record.denominator),
                Cell::from(record.share_pct),
            ]);
        }
        let fiber_sum: f64 = fiber_totals.iter().map(|(_, v)| v).sum();
        let total_sum: f64 = latest_totals.iter().map(|(_, v)| v).sum();
        page.metrics.push(Metric::with_unit(
            "Participacion Fibra",
            share_pct(fiber_sum, total_sum),
            "%",
        ));
        page.tables.push(share_table);

        // Projection: previous-year totals grown by the target rate
        let projection_metric = if let Some(prev) = yoy_prev {
            let baseline_df = period_slice(&filtered, prev)?;
            let baseline = province_sums(&baseline_df, columns::ACCESSES)?;
            let records =
                pampa_kpi::projection(&baseline, &latest_totals, self.config.target_rate);

            let mut table = ReportTable::new(
                "Proyeccion vs Real",
                ["Provincia", "Base", "Proyectado", "Real", "Desvio %"],
            );
            for record in &records {
                table.push_row([
                    Cell::from(record.key.as_str()),
                    Cell::from(record.baseline),
                    Cell::from(record.predicted),
                    Cell::from(record.actual),
                    Cell::from(record.delta_pct),
                ]);
            }
            page.tables.push(table);

            let predicted_sum: f64 = records.iter().map(|r| r.predicted).sum();
            let actual_sum: f64 = records.iter().map(|r| r.actual).sum();
            growth_pct(predicted_sum, actual_sum)
        } else {
            None
        };
        page.metrics.push(Metric::with_unit(
            "Desvio vs Proyeccion",
            projection_metric,
            "%",
        ));

        // Context from the companion sheets, narrowed to the columns
        // they actually carry
        let shared = predicate.retain_columns(&[columns::PROVINCE, columns::YEAR, columns::QUARTER]);
        page.metrics.push(self.revenue_metric(&shared)?);
        page.metrics.push(self.penetration_metric(&shared)?);

        Ok(page)
    }

    fn technology_chart(&self, df: &DataFrame) -> Result<ChartSpec> {
        let groups = grouped_sum(
            df,
            columns::TECHNOLOGY,
            columns::ACCESSES,
            GroupOrder::DescendingBySum,
        )?;
        let labels = groups.iter().map(|g| g.key.clone()).collect();
        let sums = groups.iter().map(|g| g.sum).collect();
        Ok(ChartSpec::new(ChartKind::Bar, "Accesos por Tecnologia")
            .with_labels(labels)
            .with_series(ChartSeries::from_values("Cantidad", sums)))
    }

    fn histogram_chart(&self, accesses: &[f64]) -> ChartSpec {
        let bins = stats::histogram(accesses, self.config.histogram_bins);
        let labels = bins
            .iter()
            .map(|b| format!("{:.0}-{:.0}", b.lower, b.upper))
            .collect();
        let counts = bins.iter().map(|b| b.count as f64).collect();
        ChartSpec::new(ChartKind::Histogram, "Histograma de Accesos")
            .with_labels(labels)
            .with_series(ChartSeries::from_values("Frecuencia", counts))
    }

    fn box_chart(&self, accesses: &[f64]) -> ChartSpec {
        let bounds = stats::outlier_bounds(accesses);
        let median = stats::quantile(accesses, 0.5);
        ChartSpec::new(ChartKind::Box, "Distribucion de Accesos")
            .with_labels(
                ["Limite inferior", "Q1", "Mediana", "Q3", "Limite superior"]
                    .map(String::from)
                    .to_vec(),
            )
            .with_series(ChartSeries::from_optional(
                "Cantidad",
                vec![
                    bounds.map(|b| b.lower),
                    bounds.map(|b| b.q1),
                    median,
                    bounds.map(|b| b.q3),
                    bounds.map(|b| b.upper),
                ],
            ))
    }

    fn correlation_chart(&self, df: &DataFrame) -> Result<ChartSpec> {
        let matrix = correlation_matrix(
            df,
            &[
                columns::ACCESSES,
                columns::SPEED,
                columns::YEAR,
                columns::QUARTER,
            ],
        )?;
        let mut spec = ChartSpec::new(ChartKind::Heatmap, "Correlaciones entre Variables")
            .with_labels(matrix.labels.clone());
        for (label, row) in matrix.labels.iter().zip(&matrix.cells) {
            spec = spec.with_series(ChartSeries::from_optional(label.clone(), row.clone()));
        }
        Ok(spec)
    }

    fn scatter_chart(&self, df: &DataFrame) -> Result<ChartSpec> {
        let accesses = column::numeric_values_with_nulls(df, columns::ACCESSES)?;
        let speeds = column::numeric_values_with_nulls(df, columns::SPEED)?;
        Ok(ChartSpec::new(ChartKind::Scatter, "Relacion Accesos-Velocidad")
            .with_series(ChartSeries::from_optional("Cantidad", accesses))
            .with_series(ChartSeries::from_optional("Velocidad", speeds)))
    }

    fn trend_chart(&self, df: &DataFrame) -> Result<ChartSpec> {
        let trend = grouped_sum_multi(
            df,
            &[columns::YEAR, columns::QUARTER],
            columns::ACCESSES,
            GroupOrder::FirstAppearance,
        )?;
        let labels = trend.iter().map(|g| g.key.clone()).collect();
        let sums = trend.iter().map(|g| g.sum).collect();
        Ok(
            ChartSpec::new(ChartKind::Line, "Evolucion de Accesos en el Tiempo")
                .with_labels(labels)
                .with_series(ChartSeries::from_values("Cantidad", sums)),
        )
    }

    fn outlier_table(&self, df: &DataFrame) -> Result<ReportTable> {
        let outlier_rows = stats::outliers(df, columns::ACCESSES)?;
        let provinces = column::text_values(&outlier_rows, columns::PROVINCE)?;
        let technologies = column::text_values(&outlier_rows, columns::TECHNOLOGY)?;
        let accesses = column::numeric_values_with_nulls(&outlier_rows, columns::ACCESSES)?;
        let speeds = column::numeric_values_with_nulls(&outlier_rows, columns::SPEED)?;

        let mut table = ReportTable::new(
            "Outliers Detectados",
            ["Provincia", "Tecnologia", "Cantidad", "Velocidad"],
        );
        for i in 0..outlier_rows.height() {
            table.push_row([
                Cell::Text(provinces[i].clone().unwrap_or_default()),
                Cell::Text(technologies[i].clone().unwrap_or_default()),
                Cell::Number(accesses[i]),
                Cell::Number(speeds[i]),
            ]);
        }
        Ok(table)
    }

    /// Growth metric and per-province table between `prev` and the
    /// latest period. `None` for `prev` (no predecessor in the data)
    /// yields an undefined metric and no table.
    fn growth_widgets(
        &self,
        title: &str,
        filtered: &DataFrame,
        prev: Option<(i64, i64)>,
        latest_totals: &[KeyedValue],
    ) -> Result<(Option<f64>, Option<ReportTable>)> {
        let Some(prev) = prev else {
            return Ok((None, None));
        };
        let prev_df = period_slice(filtered, prev)?;
        let prev_totals = province_sums(&prev_df, columns::ACCESSES)?;
        let records = pampa_kpi::growth(&prev_totals, latest_totals);

        let mut table = ReportTable::new(title, ["Provincia", "Anterior", "Actual", "Crecimiento %"]);
        for record in &records {
            table.push_row([
                Cell::from(record.key.as_str()),
                Cell::from(record.value_a),
                Cell::from(record.value_b),
                Cell::from(record.growth_pct),
            ]);
        }

        let prev_sum: f64 = prev_totals.iter().map(|(_, v)| v).sum();
        let latest_sum: f64 = latest_totals.iter().map(|(_, v)| v).sum();
        Ok((growth_pct(prev_sum, latest_sum), Some(table)))
    }

    fn revenue_metric(&self, predicate: &Predicate) -> Result<Metric> {
        let df = self.store.sheet(&schema::REVENUE)?;
        let filtered = filter(&df, predicate)?;
        let revenue = column::numeric_values(&filtered, columns::REVENUE)?;
        Ok(Metric::with_unit(
            "Ingresos Totales",
            stats::sum(&revenue),
            "miles de pesos",
        ))
    }

    fn penetration_metric(&self, predicate: &Predicate) -> Result<Metric> {
        let df = self.store.sheet(&schema::PENETRATION)?;
        let filtered = filter(&df, predicate)?;
        let penetration = column::numeric_values(&filtered, columns::PENETRATION)?;
        Ok(Metric::with_unit(
            "Penetracion Media",
            stats::mean(&penetration),
            "accesos/100 hogares",
        ))
    }
}

/// Distinct (year, quarter) pairs of a frame, chronologically sorted.
fn distinct_periods(df: &DataFrame) -> Result<Vec<(i64, i64)>> {
    let years = column::numeric_values_with_nulls(df, columns::YEAR)?;
    let quarters = column::numeric_values_with_nulls(df, columns::QUARTER)?;

    let mut periods: Vec<(i64, i64)> = years
        .iter()
        .zip(&quarters)
        .filter_map(|(y, q)| Some(((*y)? as i64, (*q)? as i64)))
        .collect();
    periods.sort_unstable();
    periods.dedup();
    Ok(periods)
}

/// Rows of one (year, quarter) slice.
fn period_slice(df: &DataFrame, period: (i64, i64)) -> Result<DataFrame> {
    let p = Predicate::new()
        .with_ints(columns::YEAR, [period.0])
        .with_ints(columns::QUARTER, [period.1]);
    Ok(filter(df, &p)?)
}

/// Per-province sums of a value column, first-appearance order.
fn province_sums(df: &DataFrame, value: &str) -> Result<Vec<KeyedValue>> {
    let groups = grouped_sum(df, columns::PROVINCE, value, GroupOrder::FirstAppearance)?;
    Ok(groups.into_iter().map(|g| (g.key, g.sum)).collect())
}
