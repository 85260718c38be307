use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;
use surebet_dashboard_core::errors::CoreError;
use surebet_dashboard_core::models::overview::{
    BreakdownRow, GeneralOverview, Overview, SheetOverview,
};
use surebet_dashboard_core::models::range::{DateRange, PresetTag};
use surebet_dashboard_core::models::series::DailyProfitPoint;
use surebet_dashboard_core::models::settings::Settings;
use surebet_dashboard_core::models::sheet::{NewSheet, SheetId, SheetRecord};
use surebet_dashboard_core::providers::traits::DashboardBackend;
use surebet_dashboard_core::{Page, SurebetDashboard};

// ═══════════════════════════════════════════════════════════════════
// Mock Backend (records every call, no network)
// ═══════════════════════════════════════════════════════════════════

#[derive(Default)]
struct MockState {
    calls: Vec<String>,
    ranges: Vec<DateRange>,
    sheets: Vec<SheetRecord>,
    next_id: i64,
    fail_overview: Option<String>,
    fail_refresh: bool,
    fail_list: bool,
    list_offline: bool,
}

#[derive(Clone, Default)]
struct MockBackend {
    state: Arc<Mutex<MockState>>,
}

impl MockBackend {
    fn with_sheets(names: &[&str]) -> Self {
        let mock = Self::default();
        {
            let mut state = mock.state.lock().unwrap();
            for name in names {
                state.next_id += 1;
                let id = state.next_id;
                state.sheets.push(record(id, name));
            }
        }
        mock
    }

    fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    fn ranges(&self) -> Vec<DateRange> {
        self.state.lock().unwrap().ranges.clone()
    }

    fn fail_overview(&self, message: Option<&str>) {
        self.state.lock().unwrap().fail_overview = message.map(str::to_string);
    }

    fn record_call(&self, call: String, range: Option<&DateRange>) {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call);
        if let Some(range) = range {
            state.ranges.push(*range);
        }
    }
}

fn record(id: i64, name: &str) -> SheetRecord {
    SheetRecord {
        id: SheetId::from(id),
        name: name.into(),
        google_sheet_id: format!("google-{id}"),
        range: "A1:Z1000".into(),
        created_at: None,
    }
}

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn sample_days() -> Vec<DailyProfitPoint> {
    vec![
        DailyProfitPoint::new(d(2024, 1, 1), 100.0),
        DailyProfitPoint::new(d(2024, 1, 2), -40.0),
        DailyProfitPoint::new(d(2024, 1, 3), 60.0),
    ]
}

fn sample_overview() -> Overview {
    Overview {
        total_bets: 12,
        total_profit: 120.0,
        green_percent: 75.0,
        yield_percent: 3.2,
    }
}

#[async_trait]
impl DashboardBackend for MockBackend {
    fn name(&self) -> &str {
        "Mock"
    }

    async fn overview_all(&self, range: &DateRange) -> Result<GeneralOverview, CoreError> {
        self.record_call("overview_all".into(), Some(range));
        if let Some(message) = self.state.lock().unwrap().fail_overview.clone() {
            return Err(CoreError::Api {
                endpoint: "GET /api/dashboard/overview-all".into(),
                message,
            });
        }
        Ok(GeneralOverview {
            overview: Some(sample_overview()),
            by_operator: vec![BreakdownRow {
                name: "Ana".into(),
                entries: 12,
                stake_total: 3750.0,
                profit: 120.0,
                yield_percent: 3.2,
            }],
            daily_profit: sample_days(),
        })
    }

    async fn sheet_overview(
        &self,
        sheet_id: &SheetId,
        range: &DateRange,
    ) -> Result<SheetOverview, CoreError> {
        self.record_call(format!("sheet_overview:{sheet_id}"), Some(range));
        Ok(SheetOverview {
            overview: Some(sample_overview()),
            by_house: vec![],
            by_sport: vec![],
            daily_profit: vec![DailyProfitPoint::new(d(2024, 1, 3), 25.0)],
        })
    }

    async fn refresh_sheets(&self) -> Result<(), CoreError> {
        self.record_call("refresh_sheets".into(), None);
        if self.state.lock().unwrap().fail_refresh {
            return Err(CoreError::Api {
                endpoint: "POST /api/dashboard/refresh-sheets".into(),
                message: "Google Sheets indisponível".into(),
            });
        }
        Ok(())
    }

    async fn list_sheets(&self) -> Result<Vec<SheetRecord>, CoreError> {
        self.record_call("list_sheets".into(), None);
        let state = self.state.lock().unwrap();
        if state.list_offline {
            return Err(CoreError::Network("connection refused".into()));
        }
        if state.fail_list {
            return Err(CoreError::Api {
                endpoint: "GET /api/sheets".into(),
                message: "Erro ao carregar planilhas".into(),
            });
        }
        Ok(state.sheets.clone())
    }

    async fn create_sheet(&self, sheet: &NewSheet) -> Result<SheetRecord, CoreError> {
        self.record_call(format!("create_sheet:{}", sheet.name), None);
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let mut created = record(state.next_id, &sheet.name);
        created.google_sheet_id = sheet.google_sheet_id.clone();
        created.range = sheet.range.clone();
        state.sheets.insert(0, created.clone());
        Ok(created)
    }

    async fn delete_sheet(&self, id: &SheetId) -> Result<(), CoreError> {
        self.record_call(format!("delete_sheet:{id}"), None);
        self.state.lock().unwrap().sheets.retain(|s| &s.id != id);
        Ok(())
    }
}

fn dashboard(mock: &MockBackend) -> SurebetDashboard {
    SurebetDashboard::with_backend(Settings::default(), Box::new(mock.clone())).unwrap()
}

// ═══════════════════════════════════════════════════════════════════
// General dashboard
// ═══════════════════════════════════════════════════════════════════

mod general_page {
    use super::*;

    #[tokio::test]
    async fn opens_on_today() {
        let mock = MockBackend::default();
        let mut dash = dashboard(&mock);
        let today = d(2024, 1, 3);

        assert!(dash.open_general(today).await);

        assert_eq!(mock.ranges(), vec![DateRange::single_day(today)]);
        let view = dash.general();
        assert_eq!(view.preset(), PresetTag::Daily);
        assert!(!view.is_loading());
        assert!(view.error().is_none());
        assert_eq!(view.visible().unwrap().by_operator[0].name, "Ana");

        let cumulative: Vec<f64> = dash
            .cumulative(Page::General)
            .iter()
            .map(|p| p.cumulative)
            .collect();
        assert_eq!(cumulative, vec![100.0, 60.0, 120.0]);

        let kpis = view.kpis().unwrap();
        assert_eq!(kpis.days_in_period, Some(1));
        assert_eq!(kpis.average_daily_profit, Some(120.0));
    }

    #[tokio::test]
    async fn presets_send_their_ranges() {
        let mock = MockBackend::default();
        let mut dash = dashboard(&mock);
        let today = d(2024, 3, 15);

        dash.select_general_preset(PresetTag::Last7Days, today).await;
        dash.select_general_preset(PresetTag::Monthly, today).await;

        assert_eq!(
            mock.ranges(),
            vec![
                DateRange::new(d(2024, 3, 9), today),
                DateRange::new(d(2024, 3, 1), today),
            ]
        );
        assert_eq!(*dash.general().range(), DateRange::new(d(2024, 3, 1), today));
    }

    #[tokio::test]
    async fn custom_waits_for_apply() {
        let mock = MockBackend::default();
        let mut dash = dashboard(&mock);
        let today = d(2024, 3, 15);

        assert!(!dash.select_general_preset(PresetTag::Custom, today).await);
        assert!(mock.calls().is_empty());

        dash.set_general_custom_range("2024-02-01", "").unwrap();
        assert!(dash.apply_general(today).await);

        assert_eq!(
            mock.ranges(),
            vec![DateRange {
                from: Some(d(2024, 2, 1)),
                to: None,
            }]
        );
        assert_eq!(dash.general().kpis().unwrap().days_in_period, None);
    }

    #[tokio::test]
    async fn bad_custom_date_is_rejected() {
        let mock = MockBackend::default();
        let mut dash = dashboard(&mock);
        dash.select_general_preset(PresetTag::Custom, d(2024, 3, 15)).await;
        let err = dash.set_general_custom_range("2024-13-01", "").unwrap_err();
        assert!(matches!(err, CoreError::InvalidDate(_)));
    }

    #[tokio::test]
    async fn failure_keeps_last_data() {
        let mock = MockBackend::default();
        let mut dash = dashboard(&mock);
        let today = d(2024, 1, 3);
        dash.open_general(today).await;

        mock.fail_overview(Some("Planilha fora do ar"));
        assert!(dash.select_general_preset(PresetTag::Monthly, today).await);

        let view = dash.general();
        assert_eq!(view.error(), Some("Planilha fora do ar"));
        assert!(!view.is_loading());
        assert!(view.data().is_some());
        assert_eq!(dash.cumulative(Page::General).len(), 3);

        mock.fail_overview(None);
        dash.apply_general(today).await;
        assert!(dash.general().error().is_none());
    }

    #[tokio::test]
    async fn refresh_then_reload() {
        let mock = MockBackend::default();
        let mut dash = dashboard(&mock);
        let today = d(2024, 1, 3);

        dash.refresh_and_reload(today).await.unwrap();

        assert_eq!(mock.calls(), vec!["refresh_sheets", "overview_all"]);
        assert!(dash.general().data().is_some());
    }

    #[tokio::test]
    async fn failed_refresh_skips_reload() {
        let mock = MockBackend::default();
        mock.state.lock().unwrap().fail_refresh = true;
        let mut dash = dashboard(&mock);

        let err = dash.refresh_and_reload(d(2024, 1, 3)).await.unwrap_err();

        assert_eq!(err.user_message(), "Google Sheets indisponível");
        assert_eq!(mock.calls(), vec!["refresh_sheets"]);
        assert_eq!(dash.general().error(), Some("Google Sheets indisponível"));
    }
}

// ═══════════════════════════════════════════════════════════════════
// Per-operator dashboard
// ═══════════════════════════════════════════════════════════════════

mod operator_page {
    use super::*;

    #[tokio::test]
    async fn opens_first_sheet() {
        let mock = MockBackend::with_sheets(&["Ana", "Bruno"]);
        let mut dash = dashboard(&mock);
        let today = d(2024, 1, 3);

        assert!(dash.open_operators(today).await);

        assert_eq!(dash.selected_sheet().unwrap().name, "Ana");
        assert_eq!(mock.calls(), vec!["list_sheets", "sheet_overview:1"]);
        assert_eq!(mock.ranges(), vec![DateRange::single_day(today)]);
        assert_eq!(dash.cumulative(Page::Operators)[0].cumulative, 25.0);
        assert!(dash.operators().error().is_none());
    }

    #[tokio::test]
    async fn no_sheets_no_load() {
        let mock = MockBackend::default();
        let mut dash = dashboard(&mock);

        assert!(!dash.open_operators(d(2024, 1, 3)).await);

        assert!(dash.selected_sheet().is_none());
        assert_eq!(mock.calls(), vec!["list_sheets"]);
        assert!(dash.operators().data().is_none());
    }

    #[tokio::test]
    async fn sheet_list_failure_is_shown() {
        let mock = MockBackend::with_sheets(&["Ana"]);
        mock.state.lock().unwrap().fail_list = true;
        let mut dash = dashboard(&mock);

        assert!(!dash.open_operators(d(2024, 1, 3)).await);
        assert_eq!(dash.operators().error(), Some("Erro ao carregar planilhas"));
    }

    #[tokio::test]
    async fn sheet_list_transport_failure_shows_generic_message() {
        let mock = MockBackend::with_sheets(&["Ana"]);
        mock.state.lock().unwrap().list_offline = true;
        let mut dash = dashboard(&mock);

        assert!(!dash.open_operators(d(2024, 1, 3)).await);

        assert_eq!(dash.operators().error(), Some("Erro ao carregar planilhas"));
        assert!(dash.selected_sheet().is_none());
        assert_eq!(mock.calls(), vec!["list_sheets"]);
    }

    #[tokio::test]
    async fn preset_without_sheet_does_not_load() {
        let mock = MockBackend::default();
        let mut dash = dashboard(&mock);
        let today = d(2024, 3, 15);

        assert!(!dash.select_operator_preset(PresetTag::Monthly, today).await);

        assert!(mock.calls().is_empty());
        assert_eq!(dash.operators().preset(), PresetTag::Monthly);
        assert!(!dash.operators().is_loading());
    }

    #[tokio::test]
    async fn switching_sheet_reloads_with_current_preset() {
        let mock = MockBackend::with_sheets(&["Ana", "Bruno"]);
        let mut dash = dashboard(&mock);
        let today = d(2024, 3, 15);
        dash.open_operators(today).await;
        dash.select_operator_preset(PresetTag::Last7Days, today).await;

        assert!(dash.select_sheet(&SheetId::from(2_i64), today).await.unwrap());

        let calls = mock.calls();
        assert_eq!(calls.last().unwrap(), "sheet_overview:2");
        assert_eq!(
            *mock.ranges().last().unwrap(),
            DateRange::new(d(2024, 3, 9), today)
        );
        assert_eq!(dash.selected_sheet().unwrap().name, "Bruno");
    }

    #[tokio::test]
    async fn unknown_sheet_is_rejected() {
        let mock = MockBackend::with_sheets(&["Ana"]);
        let mut dash = dashboard(&mock);
        dash.open_operators(d(2024, 1, 3)).await;

        let err = dash
            .select_sheet(&SheetId::new("99"), d(2024, 1, 3))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::ValidationError(_)));
        assert_eq!(dash.selected_sheet().unwrap().name, "Ana");
    }
}

// ═══════════════════════════════════════════════════════════════════
// Sheet management
// ═══════════════════════════════════════════════════════════════════

mod sheet_management {
    use super::*;

    #[tokio::test]
    async fn register_validates_before_calling_backend() {
        let mock = MockBackend::default();
        let mut dash = dashboard(&mock);

        let err = dash.register_sheet("  ", "abc", "").await.unwrap_err();

        assert_eq!(err.user_message(), "Nome e ID da planilha são obrigatórios");
        assert!(mock.calls().is_empty());
    }

    #[tokio::test]
    async fn register_prepends() {
        let mock = MockBackend::with_sheets(&["Ana"]);
        let mut dash = dashboard(&mock);
        dash.reload_sheets().await.unwrap();

        let created = dash.register_sheet(" Carla ", "1xYz", "").await.unwrap();

        assert_eq!(created.name, "Carla");
        assert_eq!(created.google_sheet_id, "1xYz");
        assert_eq!(created.range, "A1:Z1000");
        let names: Vec<&str> = dash.sheets().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Carla", "Ana"]);
    }

    #[tokio::test]
    async fn removing_selected_sheet_moves_selection() {
        let mock = MockBackend::with_sheets(&["Ana", "Bruno"]);
        let mut dash = dashboard(&mock);
        dash.open_operators(d(2024, 1, 3)).await;

        dash.remove_sheet(&SheetId::from(1_i64)).await.unwrap();

        assert_eq!(dash.sheets().len(), 1);
        assert_eq!(dash.selected_sheet().unwrap().name, "Bruno");
    }

    #[tokio::test]
    async fn removing_last_sheet_clears_selection() {
        let mock = MockBackend::with_sheets(&["Ana"]);
        let mut dash = dashboard(&mock);
        dash.open_operators(d(2024, 1, 3)).await;

        dash.remove_sheet(&SheetId::from(1_i64)).await.unwrap();

        assert!(dash.sheets().is_empty());
        assert!(dash.selected_sheet().is_none());
    }

    #[tokio::test]
    async fn reload_drops_vanished_selection() {
        let mock = MockBackend::with_sheets(&["Ana", "Bruno"]);
        let mut dash = dashboard(&mock);
        dash.open_operators(d(2024, 1, 3)).await;

        mock.state.lock().unwrap().sheets.remove(0);
        dash.reload_sheets().await.unwrap();

        assert!(dash.selected_sheet().is_none());
        assert_eq!(dash.sheets().len(), 1);
    }
}

// ═══════════════════════════════════════════════════════════════════
// Charts & hover
// ═══════════════════════════════════════════════════════════════════

mod charts {
    use super::*;

    #[tokio::test]
    async fn no_data_no_chart() {
        let mock = MockBackend::default();
        let mut dash = dashboard(&mock);

        assert!(dash.chart_geometry(Page::General).is_none());
        assert!(dash.render_chart(Page::Operators).is_none());
        assert!(dash.pointer_move(Page::General, 100.0, 800.0).is_none());
    }

    #[tokio::test]
    async fn pointer_is_scaled_to_canvas() {
        let mock = MockBackend::default();
        let mut dash = dashboard(&mock);
        dash.open_general(d(2024, 1, 3)).await;

        // Chart rendered at half size: 200px on screen is x=400 on the canvas.
        let tooltip = dash.pointer_move(Page::General, 200.0, 400.0).unwrap();

        assert_eq!(tooltip.index, 1);
        assert_eq!(tooltip.date, d(2024, 1, 2));
        assert_eq!(tooltip.cumulative, 60.0);
        assert_eq!((tooltip.rect.x, tooltip.rect.y), (408.0, 180.0));
        assert_eq!(dash.tooltip(Page::General), Some(tooltip));

        let svg = dash.render_chart(Page::General).unwrap();
        assert!(svg.contains("Acumulado: R$ 60.00"));
    }

    #[tokio::test]
    async fn pages_hover_independently() {
        let mock = MockBackend::with_sheets(&["Ana"]);
        let mut dash = dashboard(&mock);
        let today = d(2024, 1, 3);
        dash.open_general(today).await;
        dash.open_operators(today).await;

        dash.pointer_move(Page::General, 752.0, 800.0);

        assert_eq!(dash.tooltip(Page::General).unwrap().index, 2);
        assert!(dash.tooltip(Page::Operators).is_none());
    }

    #[tokio::test]
    async fn leave_and_reload_clear_hover() {
        let mock = MockBackend::default();
        let mut dash = dashboard(&mock);
        let today = d(2024, 1, 3);
        dash.open_general(today).await;

        dash.pointer_move(Page::General, 400.0, 800.0);
        dash.pointer_leave(Page::General);
        assert!(dash.tooltip(Page::General).is_none());

        dash.pointer_move(Page::General, 400.0, 800.0);
        dash.apply_general(today).await;
        assert!(dash.tooltip(Page::General).is_none());
        assert!(!dash.render_chart(Page::General).unwrap().contains("Acumulado"));
    }

    #[tokio::test]
    async fn preview_does_not_load() {
        let mock = MockBackend::default();
        let dash = dashboard(&mock);

        let range = dash.preview_range(Page::General, PresetTag::Monthly, d(2024, 3, 15));

        assert_eq!(range, DateRange::new(d(2024, 3, 1), d(2024, 3, 15)));
        assert!(mock.calls().is_empty());
    }
}
