use counsel_core::ModalPhase;
use counsel_core::profile::ProfileInput;
use yew::{
  Callback,
  Html,
  MouseEvent,
  Properties,
  classes,
  function_component,
  html
};

use super::profile_fields;
use crate::app::Field;

#[derive(Properties, PartialEq)]
pub struct EditModalProps {
  pub phase:       ModalPhase,
  pub form:        ProfileInput,
  pub error:       Option<String>,
  pub cities:      Vec<String>,
  pub specialties: Vec<String>,
  pub on_field:
    Callback<(Field, String)>,
  pub on_save:     Callback<()>,
  pub on_cancel:   Callback<()>
}

/// Stays mounted while closed so the
/// open/close transitions can play.
#[function_component(EditModalView)]
pub fn edit_modal_view(
  props: &EditModalProps
) -> Html {
  let onsubmit = {
    let on_save = props.on_save.clone();
    Callback::from(
      move |e: web_sys::SubmitEvent| {
        e.prevent_default();
        on_save.emit(());
      }
    )
  };
  let on_cancel_click = {
    let on_cancel =
      props.on_cancel.clone();
    Callback::from(
      move |_: MouseEvent| {
        on_cancel.emit(())
      }
    )
  };

  let backdrop = classes!(
    "modal-backdrop",
    (!props.phase.is_visible())
      .then_some("hidden")
  );
  let content = classes!(
    "modal-content",
    (!props.phase.is_revealed())
      .then_some("concealed")
  );

  html! {
      <div class={backdrop}>
          <form class={content} {onsubmit}>
              <div class="header">{ "Edit Lawyer" }</div>
              { profile_fields(&props.form, &props.cities, &props.specialties, &props.on_field) }
              {
                  if let Some(error) = props.error.clone() {
                      html! { <div class="form-error">{ error }</div> }
                  } else {
                      html! {}
                  }
              }
              <div class="actions">
                  <button type="button" class="btn" onclick={on_cancel_click}>{ "Cancel" }</button>
                  <button type="submit" class="btn primary">{ "Save Changes" }</button>
              </div>
          </form>
      </div>
  }
}
