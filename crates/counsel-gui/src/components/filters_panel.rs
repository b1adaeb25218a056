use counsel_core::filter::{
  HIGH_FEE_FLOOR,
  LOW_FEE_CEILING
};
use counsel_core::view::group_thousands;
use yew::{
  Callback,
  Html,
  Properties,
  TargetCast,
  function_component,
  html
};

use crate::app::{
  FilterControl,
  FilterControls
};

#[derive(Properties, PartialEq)]
pub struct FiltersPanelProps {
  pub controls:    FilterControls,
  pub cities:      Vec<(String, usize)>,
  pub specialties: Vec<(String, usize)>,
  pub on_change:
    Callback<(FilterControl, String)>
}

#[function_component(FiltersPanel)]
pub fn filters_panel(
  props: &FiltersPanelProps
) -> Html {
  let on_search = {
    let on_change =
      props.on_change.clone();
    Callback::from(
      move |e: web_sys::InputEvent| {
        let input: web_sys::HtmlInputElement =
          e.target_unchecked_into();
        on_change.emit((
          FilterControl::Search,
          input.value()
        ));
      }
    )
  };
  let on_select = |control: FilterControl| {
    let on_change =
      props.on_change.clone();
    Callback::from(
      move |e: web_sys::Event| {
        let select: web_sys::HtmlSelectElement =
          e.target_unchecked_into();
        on_change
          .emit((control, select.value()));
      }
    )
  };

  let low_label = format!(
    "Below PKR {}",
    group_thousands(LOW_FEE_CEILING, ',')
  );
  let high_label = format!(
    "Above PKR {}",
    group_thousands(HIGH_FEE_FLOOR, ',')
  );
  let controls = &props.controls;

  html! {
      <div class="panel filters">
          <div class="field grow">
              <label>{ "Search" }</label>
              <input
                  value={controls.search.clone()}
                  placeholder="Name or Bar ID"
                  oninput={on_search}
              />
          </div>
          <div class="field">
              <label>{ "City" }</label>
              <select value={controls.city.clone()} onchange={on_select(FilterControl::City)}>
                  <option value="">{ "All Cities" }</option>
                  {
                      for props.cities.iter().map(|(city, count)| html! {
                          <option value={city.clone()}>{ format!("{city} ({count})") }</option>
                      })
                  }
              </select>
          </div>
          <div class="field">
              <label>{ "Specialty" }</label>
              <select value={controls.specialty.clone()} onchange={on_select(FilterControl::Specialty)}>
                  <option value="">{ "All Specialties" }</option>
                  {
                      for props.specialties.iter().map(|(specialty, count)| html! {
                          <option value={specialty.clone()}>{ format!("{specialty} ({count})") }</option>
                      })
                  }
              </select>
          </div>
          <div class="field">
              <label>{ "Minimum Rating" }</label>
              <select value={controls.rating.clone()} onchange={on_select(FilterControl::Rating)}>
                  <option value="">{ "Any Rating" }</option>
                  <option value="4.5">{ "4.5+" }</option>
                  <option value="4">{ "4.0+" }</option>
                  <option value="3">{ "3.0+" }</option>
              </select>
          </div>
          <div class="field">
              <label>{ "Fee Range" }</label>
              <select value={controls.fee.clone()} onchange={on_select(FilterControl::Fee)}>
                  <option value="">{ "Any Fee" }</option>
                  <option value="low">{ low_label }</option>
                  <option value="high">{ high_label }</option>
              </select>
          </div>
      </div>
  }
}
