use counsel_core::view::{
  ProfileCard,
  StarGlyph
};
use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct ProfileCardProps {
  pub card:      ProfileCard,
  pub on_edit:   Callback<u64>,
  pub on_delete: Callback<u64>
}

#[function_component(ProfileCardView)]
pub fn profile_card_view(
  props: &ProfileCardProps
) -> Html {
  let card = &props.card;
  let id = card.id;

  html! {
      <div class="card">
          <h3 class="card-name">{ &card.name }</h3>
          <p class="card-specialty">{ format!("{} Specialist", card.specialty) }</p>
          <p class="card-meta"><span class="label">{ "City:" }</span>{ format!(" {}", card.city) }</p>
          <p class="card-meta"><span class="label">{ "Avg. Fee:" }</span>{ format!(" {}", card.fee) }</p>
          <div class="card-rating">
              {
                  for card.stars.iter().map(|glyph| {
                      let class = match glyph {
                          StarGlyph::Full | StarGlyph::Half => "star lit",
                          StarGlyph::Empty => "star",
                      };
                      html! { <span class={class}>{ glyph.symbol() }</span> }
                  })
              }
              { format!(" ({})", card.rating) }
          </div>
          <p class="card-bar-id">{ format!("Bar ID: {}", card.bar_id) }</p>
          <div class="card-actions">
              <button class="btn edit" onclick={{
                  let on_edit = props.on_edit.clone();
                  Callback::from(move |_| on_edit.emit(id))
              }}>{ "Edit" }</button>
              <button class="btn danger" onclick={{
                  let on_delete = props.on_delete.clone();
                  Callback::from(move |_| on_delete.emit(id))
              }}>{ "Delete" }</button>
          </div>
      </div>
  }
}
